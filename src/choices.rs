//! Runtime chooser selection. The built-in strategies are materialized at
//! run start, once the data set size and minimal sample size are known; the
//! `Dyn` variant carries a caller-supplied sequence as is.

use rand::rngs::StdRng;

use crate::samplers::{ExhaustiveChooser, RandomChooser};
use crate::types::Hypothesis;

/// Boxed hypothesis sequence handed to the submission loop.
pub type HypothesisStream = Box<dyn Iterator<Item = Hypothesis> + Send>;

/// Which hypotheses a run tries.
#[derive(Default)]
pub enum Chooser {
    /// Uniform random combinations, drawn with repetition and without end.
    #[default]
    Random,
    /// Every combination once, in lexicographic order.
    Exhaustive,
    /// Caller-supplied sequence. Each item must hold exactly `k` distinct
    /// indices below the data set size; they are not re-checked.
    Dyn(HypothesisStream),
}

impl Chooser {
    /// Wrap any iterator of hypotheses.
    pub fn custom<I>(hypotheses: I) -> Self
    where
        I: IntoIterator<Item = Hypothesis>,
        I::IntoIter: Send + 'static,
    {
        Chooser::Dyn(Box::new(hypotheses.into_iter()))
    }

    /// Whether this chooser can run forever on its own.
    pub fn is_infinite(&self) -> bool {
        matches!(self, Chooser::Random)
    }

    /// Turn the selection into a concrete stream for `n` points and minimal
    /// sample size `k`. `rng` is only consumed by the random strategy.
    pub fn into_stream(self, n: usize, k: usize, rng: StdRng) -> HypothesisStream {
        match self {
            Chooser::Random => Box::new(RandomChooser::with_rng(n, k, rng)),
            Chooser::Exhaustive => Box::new(ExhaustiveChooser::new(n, k)),
            Chooser::Dyn(stream) => stream,
        }
    }
}

impl std::fmt::Debug for Chooser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chooser::Random => f.write_str("Random"),
            Chooser::Exhaustive => f.write_str("Exhaustive"),
            Chooser::Dyn(_) => f.write_str("Dyn(..)"),
        }
    }
}
