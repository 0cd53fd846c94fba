//! Run configuration

use crate::engine::{check_stability, RateParams};
use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of one simulation run.
///
/// Defaults reproduce the reference study: μ = 1, λ = 0.5, 100 000 customers
/// with the first 5 000 discarded, seed 12345.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Arrival rate λ (customers per unit time)
    pub arrival_rate: f64,
    /// Service rate μ (customers per unit time)
    pub service_rate: f64,
    /// Number of simulated customers
    pub customer_count: usize,
    /// Number of leading customers excluded from the estimates
    pub warmup_count: usize,
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 0.5,
            service_rate: 1.0,
            customer_count: 100_000,
            warmup_count: 5_000,
            seed: 12345,
        }
    }
}

impl SimulationConfig {
    pub fn new(arrival_rate: f64, service_rate: f64) -> Self {
        Self {
            arrival_rate,
            service_rate,
            ..Self::default()
        }
    }

    pub fn with_customers(mut self, customer_count: usize, warmup_count: usize) -> Self {
        self.customer_count = customer_count;
        self.warmup_count = warmup_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration before any sampling happens.
    ///
    /// Order: rates must be positive, then stable, then the counts must leave
    /// at least one customer after warm-up.
    ///
    /// # Errors
    ///
    /// [`SimError::InvalidParameter`] or [`SimError::StabilityViolation`].
    pub fn validate(&self) -> SimResult<RateParams> {
        let rates = RateParams::new(self.arrival_rate, self.service_rate)?;
        check_stability(&rates)?;
        if self.customer_count < 1 {
            return Err(SimError::InvalidParameter {
                name: "customer_count",
                reason: "at least one customer is required".to_string(),
            });
        }
        if self.warmup_count >= self.customer_count {
            return Err(SimError::InvalidParameter {
                name: "warmup_count",
                reason: format!(
                    "warm-up of {} must be below customer_count {}",
                    self.warmup_count, self.customer_count
                ),
            });
        }
        Ok(rates)
    }

    /// Parse a JSON configuration. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        serde_json::from_str(json).map_err(|e| SimError::Config(e.to_string()))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SimError::Config(format!("failed reading {}: {e}", path.display())))?;
        Self::from_json_str(&contents)
    }
}
