//! Simulated sweeps checked against the closed-form oracle.

use lindley_core::{simulate, SimulationConfig};
use lindley_metrics::{
    compare, run_sweep, run_sweep_parallel, sojourn_intervals, theoretical_mm1, SweepConfig,
};

#[test]
fn light_and_moderate_traffic_match_theory() {
    for (lambda, seed) in [(0.3, 12345), (0.5, 777)] {
        let config = SimulationConfig::new(lambda, 1.0)
            .with_customers(100_000, 5_000)
            .with_seed(seed);
        let row = compare(&config).unwrap();
        let errors = row.relative_errors().unwrap();

        assert!(errors.w.abs() < 0.10, "lambda={lambda}: W error {}", errors.w);
        assert!(errors.wq.abs() < 0.10, "lambda={lambda}: Wq error {}", errors.wq);
        assert!(row.rho_error.abs() < 0.05, "lambda={lambda}: rho error {}", row.rho_error);
    }
}

#[test]
fn parallel_sweep_matches_sequential_sweep() {
    let config = SweepConfig::default()
        .with_rhos(vec![0.2, 0.5, 0.8])
        .with_customers(5_000, 500)
        .with_seed(42);

    let sequential = run_sweep(&config).unwrap();
    let parallel = run_sweep_parallel(&config).unwrap();

    assert_eq!(sequential.len(), 3);
    assert_eq!(sequential, parallel);
    for (row, rho) in sequential.iter().zip(&config.rhos) {
        assert_eq!(row.rho_input, *rho);
        assert_eq!(row.theoretical, theoretical_mm1(*rho, 1.0));
    }
}

#[test]
fn sweep_utilization_follows_rho() {
    let config = SweepConfig::default()
        .with_rhos(vec![0.1, 0.3, 0.5])
        .with_customers(20_000, 2_000);

    let rows = run_sweep_parallel(&config).unwrap();
    for row in &rows {
        assert!(row.rho_error.abs() < 0.05, "rho {} drifted by {}", row.rho_input, row.rho_error);
    }
    // Waiting grows with load.
    assert!(rows.windows(2).all(|w| w[0].simulated.wq < w[1].simulated.wq));
}

#[test]
fn unstable_sweep_is_rejected_before_running() {
    let config = SweepConfig::default().with_rhos(vec![0.5, 1.2]);
    assert!(run_sweep(&config).is_err());
    assert!(run_sweep_parallel(&config).is_err());
}

#[test]
fn batch_means_agree_with_point_estimate() {
    let config = SimulationConfig::new(0.5, 1.0)
        .with_customers(100_000, 5_000)
        .with_seed(5);
    let run = simulate(&config).unwrap();

    let intervals = sojourn_intervals(&run.trace, config.warmup_count, 50, 0.95).unwrap();
    assert_eq!(intervals.w.batches, 50);
    assert!((intervals.w.mean - run.metrics.w).abs() < 1e-9);
    assert!((intervals.wq.mean - run.metrics.wq).abs() < 1e-9);
    assert!(intervals.w.ci_low < intervals.w.mean && intervals.w.mean < intervals.w.ci_high);
    assert!(intervals.w.std_err > 0.0);
}
