//! Uniform random chooser: every step picks one of the `C(n, k)`
//! combinations with equal probability.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::Hypothesis;
use crate::utils::{binomial, index_to_combination};

/// Infinite stream of uniformly random, ascending `k`-subsets of `0..n`.
///
/// Draws are independent, so the same combination may come up more than
/// once over a run.
pub struct RandomChooser<G: Rng = StdRng> {
    rng: G,
    n: usize,
    k: usize,
    /// `C(n, k)`, or `None` when it does not fit in `u128`.
    total: Option<u128>,
}

impl RandomChooser<StdRng> {
    /// Construct from a fixed seed (primarily for tests).
    pub fn from_seed(n: usize, k: usize, seed: u64) -> Self {
        Self::with_rng(n, k, StdRng::seed_from_u64(seed))
    }
}

impl<G: Rng> RandomChooser<G> {
    pub fn with_rng(n: usize, k: usize, rng: G) -> Self {
        Self {
            rng,
            n,
            k,
            total: binomial(n, k),
        }
    }
}

impl<G: Rng> Iterator for RandomChooser<G> {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        if self.k > self.n {
            return None;
        }

        let mut out = vec![0usize; self.k];
        match self.total {
            Some(total) if total > 0 => {
                let index = self.rng.gen_range(0..total);
                index_to_combination(index, self.n, &mut out);
            }
            _ => {
                // Too many combinations to rank; draw the subset directly.
                let picked = rand::seq::index::sample(&mut self.rng, self.n, self.k);
                for (dst, idx) in out.iter_mut().zip(picked.iter()) {
                    *dst = idx;
                }
                out.sort_unstable();
            }
        }
        Some(out)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.k > self.n {
            (0, Some(0))
        } else {
            (usize::MAX, None)
        }
    }
}
