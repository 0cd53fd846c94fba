//! Traffic-intensity sweeps and theory-only sensitivity analysis
//!
//! A sweep fixes μ and runs one independent simulation per ρ. Point `i` is
//! seeded with `derive_seed(seed, i)`, so the sequential and parallel sweeps
//! produce identical rows.

use crate::comparison::{compare, ComparisonRow};
use crate::error::MetricsError;
use crate::theory::{calculate_metrics, TheoreticalMetrics};
use lindley_core::{derive_seed, sweep_span, SimulationConfig};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

/// `count` evenly spaced values from `start` to `end` inclusive.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Parameters of a sweep over traffic intensities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Fixed service rate μ; each point uses `λ = ρ·μ`
    pub service_rate: f64,
    /// Traffic intensities to visit, each in `(0, 1)`
    pub rhos: Vec<f64>,
    pub customer_count: usize,
    pub warmup_count: usize,
    /// Base seed; point `i` runs with `derive_seed(seed, i)`
    pub seed: u64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            service_rate: 1.0,
            rhos: linspace(0.05, 0.95, 19),
            customer_count: 120_000,
            warmup_count: 10_000,
            seed: 12345,
        }
    }
}

impl SweepConfig {
    pub fn with_rhos(mut self, rhos: Vec<f64>) -> Self {
        self.rhos = rhos;
        self
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

    /// Reject sweeps that would hit an unstable or empty point mid-way.
    pub fn validate(&self) -> Result<(), MetricsError> {
        if self.rhos.is_empty() {
            return Err(MetricsError::InvalidSweep("no traffic intensities given".to_string()));
        }
        if let Some(bad) = self.rhos.iter().find(|rho| !(**rho > 0.0 && **rho < 1.0)) {
            return Err(MetricsError::InvalidSweep(format!(
                "traffic intensity {bad} is outside (0, 1)"
            )));
        }
        Ok(())
    }

    /// Run configuration for the `index`-th point.
    pub fn point(&self, index: usize) -> Option<SimulationConfig> {
        let rho = *self.rhos.get(index)?;
        Some(SimulationConfig {
            arrival_rate: rho * self.service_rate,
            service_rate: self.service_rate,
            customer_count: self.customer_count,
            warmup_count: self.warmup_count,
            seed: derive_seed(self.seed, index as u64),
        })
    }

    fn points(&self) -> Vec<SimulationConfig> {
        (0..self.rhos.len()).filter_map(|i| self.point(i)).collect()
    }
}

/// Run every sweep point on the current thread, in ρ order.
pub fn run_sweep(config: &SweepConfig) -> Result<Vec<ComparisonRow>, MetricsError> {
    config.validate()?;
    let _span = sweep_span(config.rhos.len()).entered();

    let rows = config
        .points()
        .iter()
        .map(compare)
        .collect::<Result<Vec<_>, _>>()?;
    info!(points = rows.len(), "Sweep completed");
    Ok(rows)
}

/// Run sweep points concurrently on the rayon pool.
///
/// Runs share no state, and rows come back in ρ order, identical to
/// [`run_sweep`].
pub fn run_sweep_parallel(config: &SweepConfig) -> Result<Vec<ComparisonRow>, MetricsError> {
    config.validate()?;
    let _span = sweep_span(config.rhos.len()).entered();

    let rows = config
        .points()
        .par_iter()
        .map(compare)
        .collect::<Result<Vec<_>, _>>()?;
    info!(points = rows.len(), threads = rayon::current_num_threads(), "Parallel sweep completed");
    Ok(rows)
}

/// Theory-only evaluation for one arrival rate.
#[derive(Debug)]
pub struct SensitivityRow {
    pub arrival_rate: f64,
    pub outcome: Result<TheoreticalMetrics, MetricsError>,
}

/// Show how the closed-form metrics blow up as λ approaches μ.
///
/// Unstable or invalid λ values produce an error row instead of aborting the
/// analysis.
pub fn sensitivity_analysis(arrival_rates: &[f64], service_rate: f64) -> Vec<SensitivityRow> {
    arrival_rates
        .iter()
        .map(|&arrival_rate| SensitivityRow {
            arrival_rate,
            outcome: calculate_metrics(arrival_rate, service_rate),
        })
        .collect()
}
