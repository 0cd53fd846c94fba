//! # Lindley - Monte Carlo validation of single-server queueing theory
//!
//! Lindley simulates a FIFO single-server queue customer by customer and
//! compares the steady-state estimates with the closed-form M/M/1 results.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! lindley = "0.1"
//! ```
//!
//! ```rust
//! use lindley::prelude::*;
//!
//! let config = SimulationConfig::new(0.5, 1.0).with_customers(20_000, 1_000);
//! let row = compare(&config).unwrap();
//! assert!(row.theoretical.is_some());
//! ```
//!
//! ## Crates
//!
//! - [`core`]: sampling, the recurrence engine and the statistical reducer
//! - [`metrics`]: closed-form oracle, comparisons, sweeps and export

pub use lindley_core as core;

pub use lindley_metrics as metrics;

pub use lindley_core::simulate_single_server_queue;
pub use lindley_metrics::theoretical_mm1;

// Convenience re-exports of commonly used items
pub mod prelude {
    //! Commonly used types and functions

    pub use lindley_core::{
        rng_from_seed, simulate, simulate_single_server_queue, Exponential,
        NonNegativeDistribution, RateParams, SimError, SimulationConfig, SimulationRun,
        SimulationTrace, SingleServerEngine, SummaryMetrics,
    };

    pub use lindley_metrics::{
        compare, run_sweep, run_sweep_parallel, theoretical_mm1, ComparisonRow, JsonExporter,
        MetricsError, MetricsExporter, SweepConfig, SweepReport, TheoreticalMetrics,
    };
}
