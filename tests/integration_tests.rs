//! Integration tests for the public fitting API.
//!
//! These run complete fits through the worker pool on small synthetic data
//! sets and check the fitted model along with the run accounting.

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ransac::models::LinearRegression;
use ransac::samplers::combinations;
use ransac::*;

fn line_points() -> Dataset<f64> {
    Dataset::from_rows([
        [0.0, 1.0],
        [1.0, 2.0],
        [2.0, 3.0],
        [3.0, 4.0],
        [16.0, 0.0],
        [-37.0, 43.0],
    ])
    .unwrap()
}

/// Noisy points along `y = 2x - 3` followed by scattered outliers.
fn noisy_line(n_inliers: usize, n_outliers: usize, seed: u64) -> Dataset<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(n_inliers + n_outliers);
    for i in 0..n_inliers {
        let x = i as f64 * 0.5 - 10.0;
        rows.push([x, 2.0 * x - 3.0 + rng.gen_range(-0.1..0.1)]);
    }
    for _ in 0..n_outliers {
        rows.push([rng.gen_range(-10.0..10.0), rng.gen_range(50.0..100.0)]);
    }
    Dataset::from_rows(rows).unwrap()
}

/// Twelve points exactly on `y = 2x - 3` and four outliers.
fn exact_line() -> Dataset<f64> {
    let mut rows: Vec<[f64; 2]> = (0..12).map(|x| [x as f64, 2.0 * x as f64 - 3.0]).collect();
    rows.extend([[0.0, 50.0], [1.0, 70.0], [5.0, -40.0], [8.0, 90.0]]);
    Dataset::from_rows(rows).unwrap()
}

/// Model without the duplication capability.
struct Lone(LinearRegression);

impl Model<f64> for Lone {
    fn minimal_sample_size(&self) -> usize {
        2
    }

    fn fit(&mut self, points: &[&[f64]]) {
        self.0.fit(points)
    }

    fn is_inlier(&self, point: &[f64]) -> bool {
        self.0.is_inlier(point)
    }
}

/// Model whose every fit takes a while, for time-limit tests.
#[derive(Clone)]
struct Slow {
    inner: LinearRegression,
    delay: Duration,
}

impl Model<f64> for Slow {
    fn minimal_sample_size(&self) -> usize {
        2
    }

    fn fit(&mut self, points: &[&[f64]]) {
        std::thread::sleep(self.delay);
        self.inner.fit(points)
    }

    fn is_inlier(&self, point: &[f64]) -> bool {
        self.inner.is_inlier(point)
    }

    fn duplicate(&self) -> Option<Self> {
        Some(self.clone())
    }
}

#[test]
fn test_fit_line_with_outliers() {
    let data = line_points();
    let mut model = LinearRegression::new(0.5);
    let summary = fit(
        &data,
        &mut model,
        RansacSettings::default().with_max_iterations(1000),
    )
    .unwrap();

    assert_eq!(model.to_string(), "y = 1.00x + 1.00");
    assert!((model.slope - 1.0).abs() < 1e-9);
    assert!((model.intercept - 1.0).abs() < 1e-9);
    assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
    for (i, point) in data.points().enumerate() {
        assert_eq!(model.is_inlier(point), i < 4, "point {i}");
    }
    assert_eq!(summary.score, 4);
    assert!(summary.meets_min_inliers());
}

#[test]
fn test_fit_noisy_line_with_many_workers() {
    let data = noisy_line(40, 20, 7);
    let mut model = LinearRegression::new(0.3);
    let summary = Ransac::new(
        RansacSettings::default()
            .with_workers(4)
            .with_max_iterations(500),
    )
    .with_seed(11)
    .fit(&data, &mut model)
    .unwrap();

    assert!((model.slope - 2.0).abs() < 0.05, "slope {}", model.slope);
    assert!((model.intercept + 3.0).abs() < 0.1, "intercept {}", model.intercept);
    assert!(summary.inliers.len() >= 38);
    assert!(summary.inliers.iter().all(|&i| i < 40));
    assert_eq!(summary.submitted, 500);
    assert_eq!(summary.evaluated, 500);
    assert_eq!(summary.workers, 4);
    assert!(!summary.timed_out);
}

#[test]
fn test_validation_errors() {
    let data = line_points();
    let mut model = LinearRegression::new(0.5);
    let run = |settings: RansacSettings, model: &mut LinearRegression| {
        Ransac::new(settings).with_seed(0).fit(&data, model)
    };

    assert_eq!(
        run(RansacSettings::default().with_min_inliers(0), &mut model),
        Err(RansacError::MinInliersZero)
    );
    assert_eq!(
        run(RansacSettings::default().with_min_inliers(7), &mut model),
        Err(RansacError::MinInliersExceedsData {
            min_inliers: 7,
            len: 6
        })
    );
    assert_eq!(
        run(RansacSettings::default().with_workers(0), &mut model),
        Err(RansacError::WorkersZero)
    );
    assert_eq!(
        run(RansacSettings::default().with_max_iterations(0), &mut model),
        Err(RansacError::MaxIterationsZero)
    );
    assert_eq!(
        run(RansacSettings::default().without_max_iterations(), &mut model),
        Err(RansacError::Unbounded)
    );

    let tiny = Dataset::<f64>::from_rows([[0.0, 1.0]]).unwrap();
    assert_eq!(
        fit(&tiny, &mut model, RansacSettings::default()),
        Err(RansacError::SampleSizeExceedsData {
            sample_size: 2,
            len: 1
        })
    );

    // Nothing above touched the model.
    assert_eq!(model, LinearRegression::new(0.5));
}

#[test]
fn test_error_messages() {
    assert_eq!(
        RansacError::MinInliersZero.to_string(),
        "invalid parameters: minimum inliers cannot be zero"
    );
    assert_eq!(
        RansacError::NotDuplicable { workers: 3 }.to_string(),
        "model cannot be duplicated, cannot use 3 workers"
    );
}

#[test]
fn test_non_duplicable_model() {
    let data = line_points();
    let mut model = Lone(LinearRegression::new(0.5));

    let err = fit(&data, &mut model, RansacSettings::default().with_workers(4)).unwrap_err();
    assert_eq!(err, RansacError::NotDuplicable { workers: 4 });

    let summary = Ransac::new(RansacSettings::default().with_workers(1))
        .with_seed(5)
        .fit(&data, &mut model)
        .unwrap();
    assert_eq!(model.0.to_string(), "y = 1.00x + 1.00");
    assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
    assert_eq!(summary.workers, 1);
}

#[test]
fn test_iteration_cap_accounting() {
    let data = noisy_line(20, 5, 3);
    for workers in [1, 2, 5] {
        let mut model = LinearRegression::new(0.3);
        let summary = Ransac::new(
            RansacSettings::default()
                .with_workers(workers)
                .with_max_iterations(37),
        )
        .with_seed(workers as u64)
        .fit(&data, &mut model)
        .unwrap();
        assert_eq!(summary.submitted, 37);
        assert_eq!(summary.evaluated, 37, "{workers} workers");
        assert_eq!(summary.workers, workers);
    }
}

#[test]
fn test_time_limit_stops_unbounded_search() {
    let data = noisy_line(20, 5, 9);
    let mut model = Slow {
        inner: LinearRegression::new(0.3),
        delay: Duration::from_millis(2),
    };
    let limit = Duration::from_millis(100);
    let started = Instant::now();
    let summary = Ransac::new(
        RansacSettings::default()
            .without_max_iterations()
            .with_time_limit(limit)
            .with_workers(3),
    )
    .with_seed(1)
    .fit(&data, &mut model)
    .unwrap();
    let took = started.elapsed();

    assert!(summary.timed_out);
    assert!(summary.evaluated > 0);
    assert!(summary.evaluated <= summary.submitted);
    // Generous slack for slow CI machines.
    assert!(took < limit + Duration::from_secs(2), "took {took:?}");
    assert!(summary.best.is_some());
}

#[test]
fn test_zero_time_limit_leaves_model_untouched() {
    let data = line_points();
    let mut model = LinearRegression::new(0.5);
    model.slope = 7.0;
    let summary = Ransac::new(
        RansacSettings::default()
            .without_max_iterations()
            .with_time_limit(Duration::ZERO)
            .with_workers(2),
    )
    .with_seed(1)
    .fit(&data, &mut model)
    .unwrap();

    assert_eq!(summary.best, None);
    assert_eq!(summary.evaluated, 0);
    assert!(summary.timed_out);
    assert!(!summary.meets_min_inliers());
    assert_eq!(model.slope, 7.0);
    assert_eq!(model.intercept, 0.0);
}

#[test]
fn test_exhaustive_result_independent_of_workers() {
    let data = exact_line();
    let mut reference: Option<(f64, f64, Vec<usize>)> = None;
    for workers in [1, 2, 3, 8] {
        let mut model = LinearRegression::new(0.3);
        let summary = Ransac::new(RansacSettings::default().with_workers(workers))
            .with_chooser(Chooser::Exhaustive)
            .fit(&data, &mut model)
            .unwrap();
        // C(16, 2) = 120, below the default cap.
        assert_eq!(summary.submitted, 120);
        assert_eq!(summary.evaluated, 120);

        match &reference {
            None => reference = Some((model.slope, model.intercept, summary.inliers)),
            Some((slope, intercept, inliers)) => {
                assert_eq!(&summary.inliers, inliers, "{workers} workers");
                assert!((model.slope - slope).abs() < 1e-6);
                assert!((model.intercept - intercept).abs() < 1e-6);
            }
        }
    }
}

#[test]
fn test_exhaustive_respects_iteration_cap() {
    let data = noisy_line(12, 4, 21);
    let mut model = LinearRegression::new(0.3);
    let summary = Ransac::new(
        RansacSettings::default()
            .with_workers(2)
            .with_max_iterations(10),
    )
    .with_chooser(Chooser::Exhaustive)
    .fit(&data, &mut model)
    .unwrap();
    assert_eq!(summary.submitted, 10);
}

#[test]
fn test_consensus_refinement_is_stable() {
    let data = noisy_line(30, 10, 4);
    let mut model = LinearRegression::new(0.3);
    let summary = Ransac::new(RansacSettings::default().with_workers(2))
        .with_seed(8)
        .fit(&data, &mut model)
        .unwrap();

    // A second refinement of an already refined fit changes nothing.
    let again = refit_on_consensus(&data, &mut model);
    assert_eq!(again, summary.inliers);
    let slope = model.slope;
    let intercept = model.intercept;
    refit_on_consensus(&data, &mut model);
    assert!((model.slope - slope).abs() < 1e-9);
    assert!((model.intercept - intercept).abs() < 1e-9);
}

#[test]
fn test_custom_chooser() {
    let data = line_points();
    let mut model = LinearRegression::new(0.5);
    // Only outlier pairs plus one good pair at the end.
    let hypotheses = vec![vec![4, 5], vec![0, 4], vec![1, 5], vec![2, 3]];
    let summary = Ransac::new(
        RansacSettings::default()
            .without_max_iterations()
            .with_workers(2),
    )
    .with_chooser(Chooser::custom(hypotheses))
    .fit(&data, &mut model)
    .unwrap();

    assert_eq!(summary.best, Some(vec![2, 3]));
    assert_eq!(summary.submitted, 4);
    assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
}

#[test]
fn test_custom_chooser_from_combinations() {
    let data = line_points();
    let mut model = LinearRegression::new(0.5);
    let summary = Ransac::new(RansacSettings::default().with_workers(1))
        .with_chooser(Chooser::custom(combinations(data.len(), 2).take(3)))
        .fit(&data, &mut model)
        .unwrap();
    // [0, 1], [0, 2] and [0, 3] all score 4; a worker keeps the last of a tie.
    assert_eq!(summary.best, Some(vec![0, 3]));
    assert_eq!(summary.evaluated, 3);
}

#[test]
fn test_integer_points() {
    // Points clustered around 10 with two far outliers.
    #[derive(Clone)]
    struct Near {
        center: i64,
    }

    impl Model<i64> for Near {
        fn minimal_sample_size(&self) -> usize {
            1
        }

        fn fit(&mut self, points: &[&[i64]]) {
            self.center = points.iter().map(|p| p[0]).sum::<i64>() / points.len() as i64;
        }

        fn is_inlier(&self, point: &[i64]) -> bool {
            (point[0] - self.center).abs() <= 1
        }

        fn duplicate(&self) -> Option<Self> {
            Some(self.clone())
        }
    }

    let data = Dataset::from_flat(vec![10i64, 9, 11, 10, -50, 80], 1).unwrap();
    let mut model = Near { center: 0 };
    let summary = Ransac::new(RansacSettings::default().with_workers(3))
        .with_chooser(Chooser::Exhaustive)
        .fit(&data, &mut model)
        .unwrap();
    assert_eq!(model.center, 10);
    assert_eq!(summary.inliers, vec![0, 1, 2, 3]);
}
