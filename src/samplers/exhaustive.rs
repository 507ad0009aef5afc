//! Exhaustive chooser enumerating every `k`-subset of `0..n` exactly once.

use crate::types::Hypothesis;

/// Lexicographic enumeration of all `C(n, k)` combinations.
///
/// Deterministic and finite, which makes it the chooser of choice for
/// reproducible tests and for small data sets where trying everything is
/// affordable.
#[derive(Debug, Clone)]
pub struct ExhaustiveChooser {
    n: usize,
    current: Option<Vec<usize>>,
}

impl ExhaustiveChooser {
    pub fn new(n: usize, k: usize) -> Self {
        let current = (k <= n).then(|| (0..k).collect());
        Self { n, current }
    }
}

/// Every combination of `k` indices out of `n`, in lexicographic order.
pub fn combinations(n: usize, k: usize) -> ExhaustiveChooser {
    ExhaustiveChooser::new(n, k)
}

impl Iterator for ExhaustiveChooser {
    type Item = Hypothesis;

    fn next(&mut self) -> Option<Hypothesis> {
        let current = self.current.take()?;
        let k = current.len();

        // Advance: rightmost slot that can still move right.
        let mut following = current.clone();
        let pivot = (0..k).rev().find(|&i| following[i] < self.n - k + i);
        if let Some(i) = pivot {
            following[i] += 1;
            for j in i + 1..k {
                following[j] = following[j - 1] + 1;
            }
            self.current = Some(following);
        }

        Some(current)
    }
}

impl std::iter::FusedIterator for ExhaustiveChooser {}
