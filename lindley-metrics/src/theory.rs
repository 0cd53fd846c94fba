//! Closed-form M/M/1 steady-state results
//!
//! These are the comparison baseline for simulated runs. All functions are
//! pure and may be called freely, e.g. across a dense grid of ρ values.

use crate::error::MetricsError;
use serde::{Deserialize, Serialize};

/// Steady-state M/M/1 metrics for one `(λ, μ)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalMetrics {
    /// Traffic intensity `λ/μ`
    pub rho: f64,
    /// Mean time in system, `1/(μ-λ)`
    pub w: f64,
    /// Mean number in system, `ρ/(1-ρ)`
    pub l: f64,
    /// Mean time in queue, `ρ/(μ-λ)`
    pub wq: f64,
    /// Mean number in queue, `ρ²/(1-ρ)`
    pub lq: f64,
}

/// Evaluate the M/M/1 formulas, or `None` in the unstable regime `λ ≥ μ`.
///
/// Non-positive or non-finite rates have no steady state either and also
/// yield `None`.
pub fn theoretical_mm1(arrival_rate: f64, service_rate: f64) -> Option<TheoreticalMetrics> {
    if !valid_rate(arrival_rate) || !valid_rate(service_rate) {
        return None;
    }
    let rho = arrival_rate / service_rate;
    if rho >= 1.0 {
        return None;
    }

    Some(TheoreticalMetrics {
        rho,
        w: 1.0 / (service_rate - arrival_rate),
        l: rho / (1.0 - rho),
        wq: rho / (service_rate - arrival_rate),
        lq: rho * rho / (1.0 - rho),
    })
}

/// Strict variant of [`theoretical_mm1`] that explains why no result exists.
///
/// # Errors
///
/// [`MetricsError::InvalidRate`] for non-positive rates and
/// [`MetricsError::Unstable`] when `λ ≥ μ`.
pub fn calculate_metrics(arrival_rate: f64, service_rate: f64) -> Result<TheoreticalMetrics, MetricsError> {
    if !valid_rate(arrival_rate) || !valid_rate(service_rate) {
        return Err(MetricsError::InvalidRate {
            arrival_rate,
            service_rate,
        });
    }
    theoretical_mm1(arrival_rate, service_rate).ok_or(MetricsError::Unstable {
        arrival_rate,
        service_rate,
    })
}

fn valid_rate(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}
