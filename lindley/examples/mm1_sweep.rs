//! M/M/1 traffic-intensity sweep
//!
//! Simulates 19 traffic intensities between 0.05 and 0.95 with μ = 1 and logs
//! simulated against theoretical metrics. Pass a path to also write the
//! report as JSON.
//!
//! Run with: cargo run --package lindley --example mm1_sweep -- [report.json]

use lindley::core::init_simulation_logging;
use lindley::metrics::sensitivity_analysis;
use lindley::prelude::*;
use std::path::PathBuf;
use tracing::{error, info, warn};

fn main() -> Result<(), MetricsError> {
    init_simulation_logging();

    let config = SweepConfig::default();
    info!(
        points = config.rhos.len(),
        customers = config.customer_count,
        warmup = config.warmup_count,
        "Starting M/M/1 sweep"
    );

    let rows = run_sweep_parallel(&config)?;
    for row in &rows {
        match row.relative_errors() {
            Some(errors) => info!(
                rho = row.rho_input,
                sim = %row.simulated,
                w_theory = ?row.theoretical.map(|t| t.w),
                max_rel_error = errors.max_abs(),
                rho_error = row.rho_error,
                "Sweep point"
            ),
            None => warn!(rho = row.rho_input, "No theoretical prediction"),
        }
    }

    // Closed-form blow-up as λ approaches μ = 6.
    for row in sensitivity_analysis(&[4.0, 5.0, 5.5, 5.8], 6.0) {
        match row.outcome {
            Ok(m) => info!(lambda = row.arrival_rate, rho = m.rho, l = m.l, lq = m.lq, w = m.w, wq = m.wq, "Sensitivity"),
            Err(e) => error!(lambda = row.arrival_rate, error = %e, "Sensitivity"),
        }
    }

    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        let report = SweepReport::new(config, rows);
        JsonExporter::new(&path, true).export(&report)?;
        info!(path = %path.display(), max_rho_error = report.max_rho_error(), "Report written");
    }

    Ok(())
}
