//! Theory comparison, sweeps and export for single-server queue simulations
//!
//! This crate evaluates the closed-form M/M/1 results, pairs them with
//! simulated estimates from `lindley-core`, runs sweeps over traffic
//! intensity, and attaches batch-means confidence intervals.

pub mod comparison;
pub mod error;
pub mod export;
pub mod stats;
pub mod sweep;
pub mod theory;

pub use comparison::{compare, ComparisonRow, RelativeErrors};
pub use error::MetricsError;
pub use export::{JsonExporter, MetricsExporter, SweepReport};
pub use stats::{batch_means, sojourn_intervals, BatchMeansEstimate, MetricIntervals};
pub use sweep::{linspace, run_sweep, run_sweep_parallel, sensitivity_analysis, SensitivityRow, SweepConfig};
pub use theory::{calculate_metrics, theoretical_mm1, TheoreticalMetrics};
