//! Single-server queue simulation engine.
//!
//! This crate estimates steady-state metrics of a FIFO single-server queue by
//! Monte Carlo simulation. A run has three phases:
//!
//! - **Sampling** ([`dists`]): interarrival gaps and service durations are drawn
//!   from a caller-owned, seeded generator ([`randomness::SimRng`]).
//! - **Recurrence** ([`engine`]): each customer's service start and departure are
//!   derived with the Lindley recurrence.
//! - **Reduction** ([`reducer`]): the warm-up prefix is trimmed and the remaining
//!   customers are averaged into [`SummaryMetrics`].
//!
//! # Basic Usage
//!
//! ```rust
//! use lindley_core::simulate_single_server_queue;
//!
//! let metrics = simulate_single_server_queue(0.5, 1.0, 20_000, 1_000, 42).unwrap();
//! assert!(metrics.rho_empirical > 0.4 && metrics.rho_empirical < 0.6);
//! ```
//!
//! For access to the per-customer arrays use [`simulate`] with a
//! [`SimulationConfig`]:
//!
//! ```rust
//! use lindley_core::{simulate, SimulationConfig};
//!
//! let config = SimulationConfig::new(0.3, 1.0).with_customers(1_000, 100).with_seed(7);
//! let run = simulate(&config).unwrap();
//! assert_eq!(run.trace.len(), 1_000);
//! ```

pub mod config;
pub mod dists;
pub mod engine;
pub mod error;
pub mod logging;
pub mod randomness;
pub mod reducer;

use tracing::{debug, info, instrument, warn};

pub use config::SimulationConfig;
pub use dists::{arrival_times_from_gaps, sample_n, Constant, Exponential, NonNegativeDistribution};
pub use engine::{check_stability, run_recurrence, CustomerRecord, RateParams, ServerState, SimulationTrace, SingleServerEngine};
pub use error::{SimError, SimResult};
pub use logging::{init_detailed_simulation_logging, init_simulation_logging, init_simulation_logging_with_level, simulation_span, sweep_span};
pub use randomness::{derive_seed, rng_from_seed, SimRng};
pub use reducer::{reduce, SummaryMetrics};

/// Absolute gap between `rho_empirical` and `λ/μ` above which a run is flagged.
const RHO_DRIFT_WARNING: f64 = 0.1;

/// Everything produced by one simulation invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRun {
    pub config: SimulationConfig,
    pub trace: SimulationTrace,
    pub metrics: SummaryMetrics,
}

/// Run one M/M/1 simulation described by `config`.
///
/// All interarrival gaps are drawn first, then all service durations, from a
/// single stream seeded with `config.seed`.
///
/// # Errors
///
/// - [`SimError::InvalidParameter`] for non-positive rates or bad counts.
/// - [`SimError::StabilityViolation`] if `arrival_rate >= service_rate`; no
///   samples are drawn in that case.
/// - [`SimError::DegenerateWindow`] if the trimmed window spans no time.
#[instrument(skip(config), fields(
    arrival_rate = config.arrival_rate,
    service_rate = config.service_rate,
    customers = config.customer_count,
    seed = config.seed
))]
pub fn simulate(config: &SimulationConfig) -> SimResult<SimulationRun> {
    let rates = config.validate()?;
    let engine = SingleServerEngine::new(rates)?;
    let mut rng = rng_from_seed(config.seed);

    let gaps = sample_n(&Exponential::new(rates.arrival_rate)?, config.customer_count, &mut rng)?;
    let services = sample_n(&Exponential::new(rates.service_rate)?, config.customer_count, &mut rng)?;
    let arrivals = arrival_times_from_gaps(&gaps);
    debug!(customers = config.customer_count, "Sampled arrivals and service durations");

    let trace = engine.run(&arrivals, &services)?;
    let metrics = reduce(&trace, rates.arrival_rate, config.warmup_count)?;

    let drift = (metrics.rho_empirical - rates.rho()).abs();
    if drift > RHO_DRIFT_WARNING {
        warn!(
            rho_nominal = rates.rho(),
            rho_empirical = metrics.rho_empirical,
            "Empirical utilization far from nominal; consider more customers"
        );
    }
    info!(%metrics, "Simulation completed");

    Ok(SimulationRun {
        config: config.clone(),
        trace,
        metrics,
    })
}

/// Simulate an M/M/1 queue and return its steady-state estimates.
///
/// # Errors
///
/// Fails with [`SimError::StabilityViolation`] if `arrival_rate >= service_rate`
/// and with [`SimError::InvalidParameter`] for non-positive rates,
/// `customer_count < 1` or `warmup_count >= customer_count`.
pub fn simulate_single_server_queue(
    arrival_rate: f64,
    service_rate: f64,
    customer_count: usize,
    warmup_count: usize,
    rng_seed: u64,
) -> SimResult<SummaryMetrics> {
    let config = SimulationConfig {
        arrival_rate,
        service_rate,
        customer_count,
        warmup_count,
        seed: rng_seed,
    };
    simulate(&config).map(|run| run.metrics)
}
