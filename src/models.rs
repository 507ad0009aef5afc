//! Ready-made models.
//!
//! [`LinearRegression`] fits `y = slope * x + intercept` to 2-D points. It
//! serves as the reference model for the test suite and the line fitting demo.

use std::fmt;

use nalgebra::{Matrix2, Vector2};

use crate::core::Model;

/// Least-squares line over `(x, y)` points.
///
/// A point is an inlier when its vertical residual is within `threshold`.
/// A degenerate fit (all x equal) leaves non-finite parameters behind, which
/// classify every point as an outlier.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegression {
    pub threshold: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl LinearRegression {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            slope: 0.0,
            intercept: 0.0,
        }
    }

    /// Predicted y at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn is_finite(&self) -> bool {
        self.slope.is_finite() && self.intercept.is_finite()
    }
}

impl Model<f64> for LinearRegression {
    fn minimal_sample_size(&self) -> usize {
        2
    }

    fn fit(&mut self, points: &[&[f64]]) {
        // Normal equations: [sxx sx; sx n] [slope; intercept] = [sxy; sy]
        let mut ata = Matrix2::<f64>::zeros();
        let mut atb = Vector2::<f64>::zeros();
        for p in points {
            let (x, y) = (p[0], p[1]);
            ata[(0, 0)] += x * x;
            ata[(0, 1)] += x;
            ata[(1, 1)] += 1.0;
            atb[0] += x * y;
            atb[1] += y;
        }
        ata[(1, 0)] = ata[(0, 1)];

        match ata.try_inverse() {
            Some(inv) => {
                let solution = inv * atb;
                self.slope = solution[0];
                self.intercept = solution[1];
            }
            None => {
                self.slope = f64::NAN;
                self.intercept = f64::NAN;
            }
        }
    }

    fn is_inlier(&self, point: &[f64]) -> bool {
        // NaN compares false, so a degenerate fit has no inliers.
        (point[1] - self.predict(point[0])).abs() <= self.threshold
    }

    fn duplicate(&self) -> Option<Self> {
        Some(self.clone())
    }
}

impl fmt::Display for LinearRegression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.2}x + {:.2}", self.slope, self.intercept)
    }
}
