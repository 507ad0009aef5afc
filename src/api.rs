//! High-level entry points.
//!
//! A run validates its parameters, prepares one model instance per worker,
//! searches hypotheses through the [`pool`](crate::pool), refits the model on
//! the winning hypothesis and, optionally, once more on the winner's full
//! consensus set. The caller's model is fit in place.

use std::time::{Duration, Instant};

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::choices::Chooser;
use crate::core::{Model, WorkerModel};
use crate::error::RansacError;
use crate::pool;
use crate::scoring::{consensus_set, select_best};
use crate::settings::RansacSettings;
use crate::types::{Dataset, Hypothesis, Number};

/// Outcome of a run. The fitted model itself is the caller's instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FitSummary {
    /// Winning minimal sample, or `None` if no hypothesis was evaluated.
    pub best: Option<Hypothesis>,
    /// Consensus score of the winning minimal-sample fit.
    pub score: usize,
    /// Indices of the points the final model classifies as inliers.
    pub inliers: Vec<usize>,
    /// Minimum consensus size the run was configured with.
    pub min_inliers: usize,
    /// Hypotheses handed to the worker pool.
    pub submitted: usize,
    /// Hypotheses fitted and scored by the workers.
    pub evaluated: usize,
    /// Number of worker results collected.
    pub workers: usize,
    /// Whether the time limit cut the search short.
    pub timed_out: bool,
    pub elapsed: Duration,
}

impl FitSummary {
    /// Whether the final consensus set reached the configured minimum.
    pub fn meets_min_inliers(&self) -> bool {
        self.best.is_some() && self.inliers.len() >= self.min_inliers
    }
}

/// Configured fitting run.
///
/// ```
/// use ransac::{Dataset, Ransac, RansacSettings};
/// use ransac::models::LinearRegression;
///
/// let data = Dataset::<f64>::from_rows([[0.0, 1.0], [1.0, 2.0], [2.0, 3.0], [3.0, 4.0], [16.0, 0.0]])
///     .unwrap();
/// let mut model = LinearRegression::new(0.5);
/// let summary = Ransac::new(RansacSettings::default().with_max_iterations(200))
///     .with_seed(1)
///     .fit(&data, &mut model)
///     .unwrap();
/// assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
/// ```
#[derive(Debug, Default)]
pub struct Ransac {
    pub settings: RansacSettings,
    chooser: Chooser,
    rng: Option<StdRng>,
}

impl Ransac {
    pub fn new(settings: RansacSettings) -> Self {
        Self {
            settings,
            chooser: Chooser::default(),
            rng: None,
        }
    }

    pub fn with_chooser(mut self, chooser: Chooser) -> Self {
        self.chooser = chooser;
        self
    }

    /// Random source for the default chooser. Without one, a fresh
    /// entropy-seeded generator is created when the run starts.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Some(rng);
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    /// Fit `model` to `data`.
    ///
    /// All parameter checks happen before any thread or queue is created; on
    /// error the model is untouched.
    pub fn fit<R, M>(self, data: &Dataset<R>, model: &mut M) -> Result<FitSummary, RansacError>
    where
        R: Number,
        M: Model<R> + Send,
    {
        let n = data.len();
        let k = model.minimal_sample_size();
        let resolved = self.settings.resolve(n, k)?;
        if self.chooser.is_infinite() && !resolved.termination.is_bounded() {
            return Err(RansacError::Unbounded);
        }

        let mut duplicates = Vec::with_capacity(resolved.workers);
        while duplicates.len() < resolved.workers {
            match model.duplicate() {
                Some(copy) => duplicates.push(copy),
                None => break,
            }
        }
        if duplicates.len() < resolved.workers && resolved.workers > 1 {
            return Err(RansacError::NotDuplicable {
                workers: resolved.workers,
            });
        }

        let rng = self.rng.unwrap_or_else(StdRng::from_entropy);
        let hypotheses = self.chooser.into_stream(n, k, rng);

        debug!(
            "ransac: {n} points, sample size {k}, {} workers, {:?}",
            resolved.workers, resolved.termination
        );

        let start = Instant::now();
        let outcome = if duplicates.is_empty() {
            // Single worker on the caller's own instance.
            let models = vec![WorkerModel::Borrowed(&mut *model)];
            pool::run(data, models, hypotheses, &resolved.termination, start)
        } else {
            let models = duplicates.into_iter().map(WorkerModel::Owned).collect();
            pool::run(data, models, hypotheses, &resolved.termination, start)
        };

        let evaluated = outcome.results.iter().map(|r| r.evaluated).sum();
        let best = select_best(&outcome.results).cloned();

        let (best, score, inliers) = match best {
            Some(result) => {
                let hypothesis = result.hypothesis.unwrap_or_default();
                fit_hypothesis(data, model, &hypothesis);
                debug!("ransac: best hypothesis {hypothesis:?} with consensus {}", result.score);

                if resolved.consensus_refit {
                    let used = refit_on_consensus(data, model);
                    debug!("ransac: refit on consensus set of {} points", used.len());
                }
                (Some(hypothesis), result.score, consensus_set(model, data))
            }
            None => {
                debug!("ransac: no hypothesis evaluated, model left as is");
                (None, 0, Vec::new())
            }
        };

        Ok(FitSummary {
            best,
            score,
            inliers,
            min_inliers: resolved.min_inliers,
            submitted: outcome.submitted,
            evaluated,
            workers: outcome.results.len(),
            timed_out: outcome.timed_out,
            elapsed: start.elapsed(),
        })
    }
}

/// Fit `model` to `data` with the given settings and the default random
/// chooser.
pub fn fit<R, M>(
    data: &Dataset<R>,
    model: &mut M,
    settings: RansacSettings,
) -> Result<FitSummary, RansacError>
where
    R: Number,
    M: Model<R> + Send,
{
    Ransac::new(settings).fit(data, model)
}

/// Fit `model` to the points named by `hypothesis`.
pub fn fit_hypothesis<R: Number, M: Model<R> + ?Sized>(
    data: &Dataset<R>,
    model: &mut M,
    hypothesis: &[usize],
) {
    let mut sample = Vec::with_capacity(hypothesis.len());
    data.select_into(hypothesis, &mut sample);
    model.fit(&sample);
}

/// Rescan `data` with the current fit, then refit on every inlier found.
///
/// The refit happens even if the consensus set is small or empty. Returns
/// the indices the refit used.
pub fn refit_on_consensus<R: Number, M: Model<R> + ?Sized>(
    data: &Dataset<R>,
    model: &mut M,
) -> Vec<usize> {
    let inliers = consensus_set(model, data);
    fit_hypothesis(data, model, &inliers);
    inliers
}
