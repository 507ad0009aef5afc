//! Core shared types: the numeric kinds a run can work over, the immutable
//! data set, and the hypothesis alias.

use nalgebra::{DMatrix, Scalar};

use crate::error::RansacError;

mod sealed {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for i16 {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Numeric component type of a data point.
///
/// This is a closed set: `i8`, `i16`, `i32`, `i64`, `f32` and `f64`.
pub trait Number:
    num_traits::Num + Scalar + Copy + PartialOrd + Send + Sync + sealed::Sealed
{
}

impl Number for i8 {}
impl Number for i16 {}
impl Number for i32 {}
impl Number for i64 {}
impl Number for f32 {}
impl Number for f64 {}

/// Ordered set of distinct indices into a [`Dataset`], sized to the model's
/// minimal sample.
pub type Hypothesis = Vec<usize>;

/// Immutable, ordered collection of equally-sized points.
///
/// Points are stored row-major in one flat buffer so that every point is a
/// contiguous slice that can be handed to [`Model::fit`](crate::core::Model::fit)
/// without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset<R> {
    values: Vec<R>,
    dim: usize,
}

impl<R: Number> Dataset<R> {
    /// Build a data set from individual rows. All rows must share the length
    /// of the first one.
    pub fn from_rows<I, P>(rows: I) -> Result<Self, RansacError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[R]>,
    {
        let mut values = Vec::new();
        let mut dim = None;
        for (index, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            match dim {
                None => dim = Some(row.len()),
                Some(expected) if expected != row.len() => {
                    return Err(RansacError::RaggedPoints {
                        index,
                        expected,
                        found: row.len(),
                    });
                }
                Some(_) => {}
            }
            values.extend_from_slice(row);
        }

        Ok(Self {
            values,
            dim: dim.unwrap_or(0),
        })
    }

    /// Build a data set from a row-major buffer of `dim`-sized points.
    pub fn from_flat(values: Vec<R>, dim: usize) -> Result<Self, RansacError> {
        if dim == 0 || values.len() % dim != 0 {
            return Err(RansacError::FlatLength {
                len: values.len(),
                dim,
            });
        }
        Ok(Self { values, dim })
    }

    /// One point per matrix row.
    pub fn from_matrix(matrix: &DMatrix<R>) -> Self {
        let dim = matrix.ncols();
        let mut values = Vec::with_capacity(matrix.len());
        for row in matrix.row_iter() {
            values.extend(row.iter().copied());
        }
        Self { values, dim }
    }
}

impl<R> Dataset<R> {
    /// Number of points.
    pub fn len(&self) -> usize {
        if self.dim == 0 {
            0
        } else {
            self.values.len() / self.dim
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of components per point.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Point at `index`. Panics when out of range, like slice indexing.
    pub fn point(&self, index: usize) -> &[R] {
        let start = index * self.dim;
        &self.values[start..start + self.dim]
    }

    /// Iterate over all points in order.
    pub fn points(&self) -> impl ExactSizeIterator<Item = &[R]> + '_ {
        self.values.chunks_exact(self.dim.max(1))
    }

    /// Gather the points named by `indices` into `out`, reusing its allocation.
    pub(crate) fn select_into<'a>(&'a self, indices: &[usize], out: &mut Vec<&'a [R]>) {
        out.clear();
        out.extend(indices.iter().map(|&i| self.point(i)));
    }
}
