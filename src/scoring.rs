//! Consensus scoring and best-hypothesis selection.
//!
//! Two tie rules coexist on purpose and must not be unified:
//! - inside a worker, a later hypothesis replaces the kept one on an equal
//!   score ([`WorkerResult::offer`], "last wins");
//! - across workers, a result only replaces the running best on a strictly
//!   greater score ([`select_best`], "first seen wins").

use crate::core::Model;
use crate::types::{Dataset, Hypothesis, Number};

/// Number of points in `data` that `model` classifies as inliers.
pub fn consensus<R: Number, M: Model<R> + ?Sized>(model: &M, data: &Dataset<R>) -> usize {
    data.points().filter(|p| model.is_inlier(p)).count()
}

/// Indices of the points in `data` that `model` classifies as inliers.
pub fn consensus_set<R: Number, M: Model<R> + ?Sized>(model: &M, data: &Dataset<R>) -> Vec<usize> {
    data.points()
        .enumerate()
        .filter(|(_, p)| model.is_inlier(p))
        .map(|(i, _)| i)
        .collect()
}

/// What one worker reports when it exits: its best hypothesis so far (if it
/// evaluated any) and how much work it did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerResult {
    pub hypothesis: Option<Hypothesis>,
    pub score: usize,
    pub evaluated: usize,
}

impl WorkerResult {
    /// Record a scored hypothesis, keeping it if `score` is at least the
    /// current best. Returns whether it was kept.
    pub fn offer(&mut self, hypothesis: Hypothesis, score: usize) -> bool {
        self.evaluated += 1;
        if score >= self.score {
            self.score = score;
            self.hypothesis = Some(hypothesis);
            return true;
        }
        false
    }
}

/// Global best over all worker results: strictly greater score wins, so on a
/// tie the earliest result in iteration order is kept. Results without a
/// hypothesis never win.
pub fn select_best<'a, I>(results: I) -> Option<&'a WorkerResult>
where
    I: IntoIterator<Item = &'a WorkerResult>,
{
    let mut best: Option<&WorkerResult> = None;
    for result in results {
        if result.hypothesis.is_none() {
            continue;
        }
        match best {
            Some(current) if result.score <= current.score => {}
            _ => best = Some(result),
        }
    }
    best
}
