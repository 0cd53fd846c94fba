//! End-to-end runs checked against known M/M/1 steady-state values.

use lindley_core::{simulate, simulate_single_server_queue, SimError, SimulationConfig};

#[test]
fn light_traffic_queue_wait_matches_theory() {
    let (lambda, mu) = (0.3, 1.0);
    let metrics = simulate_single_server_queue(lambda, mu, 100_000, 5_000, 12345).unwrap();

    let rho: f64 = lambda / mu;
    let wq_theory = rho / (mu - lambda);
    let lq_theory = rho * rho / (1.0 - rho);
    assert!((lq_theory - 0.1286).abs() < 1e-4);

    assert!(
        (metrics.wq - wq_theory).abs() <= 0.10 * wq_theory,
        "Wq {} vs theory {wq_theory}",
        metrics.wq
    );
    assert!(
        (metrics.lq - lq_theory).abs() <= 0.10 * lq_theory,
        "Lq {} vs theory {lq_theory}",
        metrics.lq
    );
}

#[test]
fn empirical_utilization_tracks_rho() {
    let metrics = simulate_single_server_queue(0.5, 1.0, 100_000, 5_000, 2024).unwrap();
    assert!(
        (0.45..=0.55).contains(&metrics.rho_empirical),
        "rho_empirical = {}",
        metrics.rho_empirical
    );
}

#[test]
fn littles_law_holds_by_construction() {
    let metrics = simulate_single_server_queue(0.4, 1.0, 10_000, 500, 3).unwrap();
    assert_eq!(metrics.l, 0.4 * metrics.w);
    assert_eq!(metrics.lq, 0.4 * metrics.wq);
    assert!(metrics.w > metrics.wq);
}

#[test]
fn equal_rates_are_unstable() {
    let err = simulate_single_server_queue(5.0, 5.0, 1_000, 100, 1).unwrap_err();
    assert_eq!(
        err,
        SimError::StabilityViolation {
            arrival_rate: 5.0,
            service_rate: 5.0
        }
    );
}

#[test]
fn overloaded_queue_is_unstable() {
    assert!(matches!(
        simulate_single_server_queue(2.0, 1.0, 1_000, 100, 1),
        Err(SimError::StabilityViolation { .. })
    ));
}

#[test]
fn warmup_equal_to_customer_count_is_rejected() {
    assert!(matches!(
        simulate_single_server_queue(0.5, 1.0, 1_000, 1_000, 1),
        Err(SimError::InvalidParameter { name: "warmup_count", .. })
    ));
}

#[test]
fn invalid_rates_and_counts_are_rejected() {
    assert!(matches!(
        simulate_single_server_queue(-1.0, 1.0, 1_000, 0, 1),
        Err(SimError::InvalidParameter { name: "arrival_rate", .. })
    ));
    assert!(matches!(
        simulate_single_server_queue(0.5, 0.0, 1_000, 0, 1),
        Err(SimError::InvalidParameter { name: "service_rate", .. })
    ));
    assert!(matches!(
        simulate_single_server_queue(0.5, 1.0, 0, 0, 1),
        Err(SimError::InvalidParameter { name: "customer_count", .. })
    ));
}

#[test]
fn run_exposes_trace_and_metrics() {
    let config = SimulationConfig::new(0.5, 1.0).with_customers(2_000, 200).with_seed(11);
    let run = simulate(&config).unwrap();

    assert_eq!(run.config, config);
    assert_eq!(run.trace.len(), 2_000);
    let arrivals = run.trace.arrival_times();
    assert!(arrivals.windows(2).all(|w| w[0] < w[1]));
    assert!(run.trace.service_durations().iter().all(|&s| s >= 0.0));
}
