//! Error taxonomy. Every variant except the data set construction errors is
//! raised by parameter validation, before any queue or worker exists.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RansacError {
    #[error("invalid parameters: minimum inliers cannot be zero")]
    MinInliersZero,

    #[error(
        "invalid parameters: minimum inliers ({min_inliers}) cannot be greater than the number of data points ({len})"
    )]
    MinInliersExceedsData { min_inliers: usize, len: usize },

    #[error("invalid parameters: number of workers cannot be zero")]
    WorkersZero,

    #[error("invalid parameters: max iterations cannot be zero")]
    MaxIterationsZero,

    #[error("invalid parameters: model minimal sample size cannot be zero")]
    ZeroSampleSize,

    #[error(
        "invalid parameters: model minimal sample size ({sample_size}) exceeds the number of data points ({len})"
    )]
    SampleSizeExceedsData { sample_size: usize, len: usize },

    #[error(
        "invalid parameters: random chooser without an iteration cap or time limit would never stop"
    )]
    Unbounded,

    #[error("model cannot be duplicated, cannot use {workers} workers")]
    NotDuplicable { workers: usize },

    #[error("point {index} has {found} components, expected {expected}")]
    RaggedPoints {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("flat buffer of length {len} cannot hold points of dimension {dim}")]
    FlatLength { len: usize, dim: usize },
}
