//! Simulation-versus-theory comparison for a single run

use crate::error::MetricsError;
use crate::theory::{theoretical_mm1, TheoreticalMetrics};
use lindley_core::{simulate, SimulationConfig, SummaryMetrics};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One simulated run next to its closed-form prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Nominal traffic intensity `λ/μ`
    pub rho_input: f64,
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub simulated: SummaryMetrics,
    pub theoretical: Option<TheoreticalMetrics>,
    /// `rho_empirical - rho_input`
    pub rho_error: f64,
}

/// Signed relative error `(simulated - theory) / theory` per metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeErrors {
    pub w: f64,
    pub l: f64,
    pub wq: f64,
    pub lq: f64,
}

impl RelativeErrors {
    /// Largest absolute relative error across the four metrics.
    pub fn max_abs(&self) -> f64 {
        [self.w, self.l, self.wq, self.lq]
            .into_iter()
            .map(f64::abs)
            .fold(0.0, f64::max)
    }
}

impl ComparisonRow {
    pub fn new(arrival_rate: f64, service_rate: f64, simulated: SummaryMetrics) -> Self {
        let rho_input = arrival_rate / service_rate;
        Self {
            rho_input,
            arrival_rate,
            service_rate,
            simulated,
            theoretical: theoretical_mm1(arrival_rate, service_rate),
            rho_error: simulated.rho_empirical - rho_input,
        }
    }

    /// `None` when the oracle has no prediction for these rates.
    pub fn relative_errors(&self) -> Option<RelativeErrors> {
        let th = self.theoretical?;
        let sim = &self.simulated;
        Some(RelativeErrors {
            w: (sim.w - th.w) / th.w,
            l: (sim.l - th.l) / th.l,
            wq: (sim.wq - th.wq) / th.wq,
            lq: (sim.lq - th.lq) / th.lq,
        })
    }

    pub fn within_tolerance(&self, relative: f64) -> bool {
        self.relative_errors()
            .is_some_and(|errors| errors.max_abs() <= relative)
    }
}

/// Simulate `config` and pair the estimates with the M/M/1 prediction.
pub fn compare(config: &SimulationConfig) -> Result<ComparisonRow, MetricsError> {
    let run = simulate(config)?;
    let row = ComparisonRow::new(config.arrival_rate, config.service_rate, run.metrics);
    debug!(
        rho = row.rho_input,
        rho_error = row.rho_error,
        max_rel_error = ?row.relative_errors().map(|e| e.max_abs()),
        "Compared simulation with theory"
    );
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(w: f64, wq: f64, lambda: f64, rho_empirical: f64) -> SummaryMetrics {
        SummaryMetrics {
            w,
            l: lambda * w,
            wq,
            lq: lambda * wq,
            rho_empirical,
        }
    }

    #[test]
    fn test_row_against_exact_theory() {
        // Theory for λ=0.5, μ=1: W=2, Wq=1.
        let row = ComparisonRow::new(0.5, 1.0, metrics(2.0, 1.0, 0.5, 0.52));

        assert_eq!(row.rho_input, 0.5);
        assert!((row.rho_error - 0.02).abs() < 1e-12);
        let errors = row.relative_errors().unwrap();
        assert!(errors.max_abs() < 1e-12);
        assert!(row.within_tolerance(0.01));
    }

    #[test]
    fn test_relative_errors_are_signed() {
        let row = ComparisonRow::new(0.5, 1.0, metrics(2.2, 0.9, 0.5, 0.5));
        let errors = row.relative_errors().unwrap();

        assert!((errors.w - 0.1).abs() < 1e-12);
        assert!((errors.wq + 0.1).abs() < 1e-12);
        assert!((errors.max_abs() - 0.1).abs() < 1e-12);
        assert!(!row.within_tolerance(0.05));
    }

    #[test]
    fn test_no_theory_no_tolerance() {
        let row = ComparisonRow::new(1.0, 1.0, metrics(1.0, 1.0, 1.0, 1.0));
        assert!(row.theoretical.is_none());
        assert!(row.relative_errors().is_none());
        assert!(!row.within_tolerance(1.0));
    }

    #[test]
    fn test_compare_propagates_stability_violation() {
        let config = SimulationConfig::new(1.0, 1.0);
        assert!(matches!(
            compare(&config),
            Err(MetricsError::Simulation(lindley_core::SimError::StabilityViolation { .. }))
        ));
    }
}
