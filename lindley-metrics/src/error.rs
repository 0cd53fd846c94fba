//! Error types for comparison, sweeps and export

use lindley_core::SimError;
use thiserror::Error;

/// Errors related to theory evaluation, sweeps and metrics export
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("Rates must be positive, got lambda={arrival_rate} mu={service_rate}")]
    InvalidRate { arrival_rate: f64, service_rate: f64 },

    #[error("Stability requires lambda < mu, got lambda={arrival_rate} mu={service_rate}")]
    Unstable { arrival_rate: f64, service_rate: f64 },

    #[error("Invalid sweep: {0}")]
    InvalidSweep(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
