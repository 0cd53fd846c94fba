//! Structured logging for simulation runs
//!
//! The engine emits `tracing` events; nothing is printed unless a subscriber
//! is installed. The helpers here install a `tracing-subscriber` fmt layer with
//! an [`EnvFilter`], so `RUST_LOG` always takes precedence:
//!
//! ```bash
//! RUST_LOG=debug cargo run --example mm1_sweep
//! RUST_LOG=lindley_core::engine=trace,lindley_metrics=debug cargo run --example mm1_sweep
//! ```
//!
//! Level guidelines:
//! - **TRACE**: per-run reduction details
//! - **DEBUG**: phase boundaries (sampling, recurrence, reduction)
//! - **INFO**: run and sweep completion
//! - **WARN**: estimates far from their nominal values

use tracing::{info, Span};
use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging at `info`.
pub fn init_simulation_logging() -> bool {
    init_simulation_logging_with_level("info")
}

/// Initialize logging with a specific default level.
///
/// Returns `false` if a global subscriber was already installed, in which case
/// the existing one is kept.
///
/// # Example
/// ```rust
/// use lindley_core::logging::init_simulation_logging_with_level;
///
/// init_simulation_logging_with_level("debug");
/// ```
pub fn init_simulation_logging_with_level(level: &str) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("{level},lindley_core={level},lindley_metrics={level}").into()
    });

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Simulation logging initialized at level: {}", level);
    }
    installed
}

/// Very verbose, pretty-printed output for debugging a single run.
pub fn init_detailed_simulation_logging() -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "debug,lindley_core=trace,lindley_metrics=trace".into());

    let installed = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .pretty(),
        )
        .with(filter)
        .try_init()
        .is_ok();

    if installed {
        info!("Detailed simulation logging initialized");
    }
    installed
}

/// Span covering one simulation run.
pub fn simulation_span(name: &str) -> Span {
    tracing::info_span!("simulation", name = name)
}

/// Span covering a sweep over `points` traffic intensities.
pub fn sweep_span(points: usize) -> Span {
    tracing::info_span!("sweep", points = points)
}
