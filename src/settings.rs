//! Run configuration.
//!
//! `RansacSettings` starts from defaults and is overridden field by field
//! (directly or through the `with_*` builders). Nothing is checked until a
//! run starts; see [`RansacSettings::resolve`].

use std::time::Duration;

use crate::error::RansacError;
use crate::termination::Termination;

/// Main configuration object for a fitting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RansacSettings {
    /// Stop conditions for the hypothesis search.
    pub termination: Termination,
    /// Minimum consensus size a run must be able to reach. `None` uses the
    /// model's minimal sample size.
    pub min_inliers: Option<usize>,
    /// Number of parallel workers. `None` uses one per available core.
    pub workers: Option<usize>,
    /// Refit the winner on its full consensus set.
    pub consensus_refit: bool,
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            termination: Termination::default(),
            min_inliers: None,
            workers: None,
            consensus_refit: true,
        }
    }
}

impl RansacSettings {
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.termination.max_iterations = Some(max_iterations);
        self
    }

    /// Remove the iteration cap. Another stop condition (a time limit or a
    /// finite chooser) must then end the run.
    pub fn without_max_iterations(mut self) -> Self {
        self.termination.max_iterations = None;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.termination.time_limit = Some(time_limit);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_min_inliers(mut self, min_inliers: usize) -> Self {
        self.min_inliers = Some(min_inliers);
        self
    }

    pub fn with_consensus_refit(mut self, consensus_refit: bool) -> Self {
        self.consensus_refit = consensus_refit;
        self
    }

    /// Validate the settings against a data set of `len` points and a model
    /// with the given minimal sample size, filling in defaults.
    ///
    /// Checks run in a fixed order and the first failure is returned.
    pub fn resolve(&self, len: usize, sample_size: usize) -> Result<ResolvedSettings, RansacError> {
        if sample_size == 0 {
            return Err(RansacError::ZeroSampleSize);
        }
        if sample_size > len {
            return Err(RansacError::SampleSizeExceedsData { sample_size, len });
        }

        let min_inliers = self.min_inliers.unwrap_or(sample_size);
        if min_inliers == 0 {
            return Err(RansacError::MinInliersZero);
        }
        if min_inliers > len {
            return Err(RansacError::MinInliersExceedsData { min_inliers, len });
        }

        let workers = self.workers.unwrap_or_else(default_workers);
        if workers == 0 {
            return Err(RansacError::WorkersZero);
        }

        self.termination.validate()?;

        Ok(ResolvedSettings {
            termination: self.termination,
            min_inliers,
            workers,
            consensus_refit: self.consensus_refit,
        })
    }
}

/// Settings after defaults have been applied and validation has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedSettings {
    pub termination: Termination,
    pub min_inliers: usize,
    pub workers: usize,
    pub consensus_refit: bool,
}

fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
