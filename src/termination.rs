//! When to stop handing out hypotheses.
//!
//! The iteration cap is checked by the submission loop after every
//! submitted hypothesis. The time limit becomes a deadline shared by the
//! submission loop and every worker through the pool's cancellation signal.

use std::time::{Duration, Instant};

use crate::error::RansacError;

/// Enabled stop conditions and their thresholds. `None` disables a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Termination {
    /// Maximum number of hypotheses submitted to the pool.
    pub max_iterations: Option<usize>,
    /// Wall-clock budget for the whole search.
    pub time_limit: Option<Duration>,
}

impl Default for Termination {
    fn default() -> Self {
        Self {
            max_iterations: Some(1000),
            time_limit: None,
        }
    }
}

impl Termination {
    /// No condition enabled; only a finite chooser ends such a run.
    pub const fn unbounded() -> Self {
        Self {
            max_iterations: None,
            time_limit: None,
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.max_iterations.is_some() || self.time_limit.is_some()
    }

    /// Whether the submission loop must stop after `submitted` hypotheses.
    pub fn reached(&self, submitted: usize) -> bool {
        matches!(self.max_iterations, Some(cap) if submitted >= cap)
    }

    /// Shared deadline for a run started at `start`, if a time limit is set.
    pub fn deadline(&self, start: Instant) -> Option<Instant> {
        self.time_limit.map(|limit| start + limit)
    }

    pub(crate) fn validate(&self) -> Result<(), RansacError> {
        if self.max_iterations == Some(0) {
            return Err(RansacError::MaxIterationsZero);
        }
        Ok(())
    }
}
