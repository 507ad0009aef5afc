//! Model capability set consumed by the fitting engine.
//!
//! The engine knows nothing about the model's mathematics. It only needs to
//! know how many points make a minimal sample, how to (re)fit the model in
//! place, and whether a point agrees with the current fit. Running more than
//! one worker additionally needs independent copies of the model, which is an
//! optional capability expressed through [`Model::duplicate`].

use std::ops::{Deref, DerefMut};

use crate::types::Number;

/// A fittable model over points with components of type `R`.
pub trait Model<R: Number> {
    /// Smallest number of points needed to fit the model (e.g. 2 for a line).
    fn minimal_sample_size(&self) -> usize;

    /// Fit the model to `points`, overwriting any previous fit.
    ///
    /// Called with exactly [`minimal_sample_size`](Model::minimal_sample_size)
    /// points while searching, and with the whole consensus set during
    /// refinement.
    fn fit(&mut self, points: &[&[R]]);

    /// Whether `point` agrees with the current fit.
    fn is_inlier(&self, point: &[R]) -> bool;

    /// Independent copy for another worker, or `None` if the model cannot be
    /// duplicated. Models that are `Clone` usually return `Some(self.clone())`.
    ///
    /// Without this capability the engine runs a single worker on the
    /// caller's instance.
    fn duplicate(&self) -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

/// The instance a worker fits against.
///
/// `Owned` holds a duplicate that no other worker can see. `Borrowed` is the
/// single-worker fallback for models without [`Model::duplicate`]: the worker
/// operates on the caller's model directly.
pub enum WorkerModel<'a, M> {
    Owned(M),
    Borrowed(&'a mut M),
}

impl<M> Deref for WorkerModel<'_, M> {
    type Target = M;

    fn deref(&self) -> &M {
        match self {
            WorkerModel::Owned(m) => m,
            WorkerModel::Borrowed(m) => m,
        }
    }
}

impl<M> DerefMut for WorkerModel<'_, M> {
    fn deref_mut(&mut self) -> &mut M {
        match self {
            WorkerModel::Owned(m) => m,
            WorkerModel::Borrowed(m) => m,
        }
    }
}

impl<'a, R: Number, M: Model<R>> Model<R> for WorkerModel<'a, M> {
    fn minimal_sample_size(&self) -> usize {
        (**self).minimal_sample_size()
    }

    fn fit(&mut self, points: &[&[R]]) {
        (**self).fit(points)
    }

    fn is_inlier(&self, point: &[R]) -> bool {
        (**self).is_inlier(point)
    }
}
