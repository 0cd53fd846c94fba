//! Statistical reduction of a trace into steady-state metrics
//!
//! The first `warmup_count` customers are discarded to remove the bias of
//! starting from an empty system. Queue and system lengths are inferred from
//! the mean times via Little's Law rather than sampled over time, which is
//! only exact in steady state.

use crate::engine::SimulationTrace;
use crate::error::{ensure_positive_rate, SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::trace;

/// Steady-state estimates from one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Mean time in system.
    pub w: f64,
    /// Mean number in system, `λ·W`.
    pub l: f64,
    /// Mean time waiting in queue.
    pub wq: f64,
    /// Mean number waiting in queue, `λ·Wq`.
    pub lq: f64,
    /// Fraction of the post-warm-up window during which the server was busy.
    pub rho_empirical: f64,
}

impl fmt::Display for SummaryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "W={:.4} L={:.4} Wq={:.4} Lq={:.4} rho={:.4}",
            self.w, self.l, self.wq, self.lq, self.rho_empirical
        )
    }
}

/// Reduce a trace to [`SummaryMetrics`].
///
/// Utilization is total service time in the window divided by
/// `departure[last] - arrival[warmup_count]`.
///
/// # Errors
///
/// - [`SimError::InvalidParameter`] if `warmup_count` leaves no customer or
///   `arrival_rate` is not positive.
/// - [`SimError::DegenerateWindow`] if the window spans zero elapsed time.
pub fn reduce(trace: &SimulationTrace, arrival_rate: f64, warmup_count: usize) -> SimResult<SummaryMetrics> {
    ensure_positive_rate("arrival_rate", arrival_rate)?;
    let n = trace.len();
    if warmup_count >= n {
        return Err(SimError::invalid(
            "warmup_count",
            format!("warm-up of {warmup_count} leaves no customers out of {n}"),
        ));
    }

    let arrivals = &trace.arrival_times()[warmup_count..];
    let services = &trace.service_durations()[warmup_count..];
    let starts = &trace.service_start_times()[warmup_count..];
    let departures = &trace.departure_times()[warmup_count..];
    let kept = arrivals.len() as f64;

    let mut sojourn_sum = 0.0;
    let mut wait_sum = 0.0;
    for ((arrival, start), departure) in arrivals.iter().zip(starts).zip(departures) {
        sojourn_sum += departure - arrival;
        wait_sum += start - arrival;
    }
    let w = sojourn_sum / kept;
    let wq = wait_sum / kept;

    let busy_time: f64 = services.iter().sum();
    let (Some(first_arrival), Some(last_departure)) = (arrivals.first(), departures.last()) else {
        return Err(SimError::invalid("warmup_count", "post-warm-up window is empty"));
    };
    let elapsed = last_departure - first_arrival;
    if !(elapsed > 0.0) {
        return Err(SimError::DegenerateWindow { elapsed });
    }
    let rho_empirical = busy_time / elapsed;

    trace!(
        kept = arrivals.len(),
        busy_time,
        elapsed,
        "Reduced post-warm-up window"
    );

    Ok(SummaryMetrics {
        w,
        l: arrival_rate * w,
        wq,
        lq: arrival_rate * wq,
        rho_empirical,
    })
}
