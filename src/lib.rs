//! # ransac - Parallel RANSAC model fitting
//!
//! `ransac` fits a user-supplied model to data contaminated with outliers. It
//! repeatedly fits the model to small candidate subsets (hypotheses), scores
//! each fit by how many points agree with it, and keeps the best one. The
//! hypotheses are evaluated by a pool of worker threads.
//!
//! ## Quick Start
//!
//! ```rust
//! use ransac::{fit, Dataset, RansacSettings};
//! use ransac::models::LinearRegression;
//!
//! let data = Dataset::<f64>::from_rows([
//!     [0.0, 1.0],
//!     [1.0, 2.0],
//!     [2.0, 3.0],
//!     [3.0, 4.0],
//!     [16.0, 0.0],
//!     [-37.0, 43.0],
//! ])
//! .unwrap();
//!
//! let mut model = LinearRegression::new(0.5);
//! let summary = fit(&data, &mut model, RansacSettings::default()).unwrap();
//! assert_eq!(model.to_string(), "y = 1.00x + 1.00");
//! assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
//! ```
//!
//! ## Custom Models
//!
//! Anything implementing [`Model`](core::Model) can be fitted. Returning a copy
//! from [`Model::duplicate`](core::Model::duplicate) lets the engine run more
//! than one worker; without it a run must use a single worker.
//!
//! ```rust
//! use ransac::core::Model;
//!
//! #[derive(Clone)]
//! struct Level {
//!     value: i32,
//! }
//!
//! impl Model<i32> for Level {
//!     fn minimal_sample_size(&self) -> usize {
//!         1
//!     }
//!
//!     fn fit(&mut self, points: &[&[i32]]) {
//!         self.value = points[0][0];
//!     }
//!
//!     fn is_inlier(&self, point: &[i32]) -> bool {
//!         (point[0] - self.value).abs() <= 1
//!     }
//!
//!     fn duplicate(&self) -> Option<Self> {
//!         Some(self.clone())
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! - **[`api`](api)**: `Ransac` runner, `fit` and consensus refinement
//! - **[`core`](core)**: The `Model` trait
//! - **[`choices`](choices)**: Runtime chooser selection
//! - **[`samplers`](samplers)**: Random and exhaustive hypothesis choosers
//! - **[`scoring`](scoring)**: Consensus scoring and best-result selection
//! - **[`settings`](settings)**: Run configuration and validation
//! - **[`termination`](termination)**: Iteration cap and time limit
//! - **[`models`](models)**: Ready-made models

pub mod api;
pub mod choices;
pub mod core;
pub mod error;
pub mod models;
mod pool;
pub mod samplers;
pub mod scoring;
pub mod settings;
pub mod termination;
pub mod types;
pub mod utils;

// Re-export high-level API
pub use api::{fit, refit_on_consensus, FitSummary, Ransac};

pub use choices::Chooser;
pub use core::Model;
pub use error::RansacError;
pub use settings::RansacSettings;
pub use termination::Termination;
pub use types::{Dataset, Hypothesis, Number};
