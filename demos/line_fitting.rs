//! Example: Robust line fitting using RANSAC
//!
//! Fits `LinearRegression` to noisy points on a line mixed with random
//! outliers, once with the random chooser under a time limit and once with
//! the exhaustive chooser.

use std::time::Duration;

use nalgebra::DMatrix;
use rand::seq::SliceRandom;
use rand::Rng;
use ransac::models::LinearRegression;
use ransac::{Chooser, Dataset, Ransac, RansacSettings};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Robust Line Fitting Example ===\n");

    // Generate synthetic data: y = 2x + 1 with noise, plus outliers
    let n_inliers = 60;
    let n_outliers = 25;
    let n_total = n_inliers + n_outliers;

    let mut rng = rand::thread_rng();

    let true_slope = 2.0;
    let true_intercept = 1.0;

    println!("True line: y = {:.2}x + {:.2}", true_slope, true_intercept);
    println!(
        "Generating {} inliers and {} outliers\n",
        n_inliers, n_outliers
    );

    let mut points = Vec::new();
    for i in 0..n_inliers {
        let x = (i as f64) * 0.2 - 6.0;
        let y = true_slope * x + true_intercept + rng.gen_range(-0.3..0.3);
        points.push((x, y));
    }
    for _ in 0..n_outliers {
        let x = rng.gen_range(-10.0..10.0);
        let y = rng.gen_range(-20.0..20.0);
        points.push((x, y));
    }
    points.shuffle(&mut rng);

    let mut points_matrix = DMatrix::<f64>::zeros(n_total, 2);
    for (i, &(x, y)) in points.iter().enumerate() {
        points_matrix[(i, 0)] = x;
        points_matrix[(i, 1)] = y;
    }
    let data = Dataset::from_matrix(&points_matrix);

    // Random hypotheses, stopped by the iteration cap or the time limit.
    let mut model = LinearRegression::new(0.5);
    let settings = RansacSettings::default()
        .with_max_iterations(2000)
        .with_time_limit(Duration::from_millis(500));
    let summary = Ransac::new(settings).fit(&data, &mut model)?;

    println!("RANSAC Results (random chooser):");
    println!(
        "  Found {} inliers out of {} points",
        summary.inliers.len(),
        n_total
    );
    println!(
        "  Inlier ratio: {:.2}%",
        100.0 * summary.inliers.len() as f64 / n_total as f64
    );
    println!("  Best minimal sample: {:?}", summary.best);
    println!(
        "  Hypotheses: {} submitted, {} evaluated by {} workers in {:?}{}",
        summary.submitted,
        summary.evaluated,
        summary.workers,
        summary.elapsed,
        if summary.timed_out { " (timed out)" } else { "" }
    );
    println!("\nEstimated line: {}", model);
    println!("  Error in slope: {:.4}", (model.slope - true_slope).abs());
    println!(
        "  Error in intercept: {:.4}",
        (model.intercept - true_intercept).abs()
    );

    let found_inliers = summary
        .inliers
        .iter()
        .filter(|&&idx| {
            let (x, y) = points[idx];
            (y - (true_slope * x + true_intercept)).abs() < 0.5
        })
        .count();
    println!(
        "\nCorrectly identified {} out of {} true inliers",
        found_inliers, n_inliers
    );

    // Every pair once: C(85, 2) = 3570 hypotheses.
    let mut exhaustive = LinearRegression::new(0.5);
    let summary = Ransac::new(RansacSettings::default().without_max_iterations())
        .with_chooser(Chooser::Exhaustive)
        .fit(&data, &mut exhaustive)?;
    println!(
        "\nExhaustive chooser: {} ({} inliers, {} hypotheses)",
        exhaustive,
        summary.inliers.len(),
        summary.evaluated
    );

    Ok(())
}
