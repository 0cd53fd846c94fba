//! Export of sweep results for external analysis and plotting tools

mod json;

pub use json::JsonExporter;

use crate::comparison::ComparisonRow;
use crate::error::MetricsError;
use crate::sweep::SweepConfig;
use serde::{Deserialize, Serialize};

/// A sweep's parameters together with its rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    pub config: SweepConfig,
    pub rows: Vec<ComparisonRow>,
}

impl SweepReport {
    pub fn new(config: SweepConfig, rows: Vec<ComparisonRow>) -> Self {
        Self { config, rows }
    }

    /// Largest `|rho_empirical - rho_input|` across the sweep.
    pub fn max_rho_error(&self) -> f64 {
        self.rows
            .iter()
            .map(|row| row.rho_error.abs())
            .fold(0.0, f64::max)
    }
}

/// Trait for writing a sweep report to some sink.
pub trait MetricsExporter {
    fn export(&self, report: &SweepReport) -> Result<(), MetricsError>;
}
