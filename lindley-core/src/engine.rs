//! Single-server FIFO recurrence engine
//!
//! Customers are served in arrival order by one server. For each customer the
//! engine applies the Lindley recurrence
//!
//! ```text
//! start[i]     = max(arrival[i], server_free_at)
//! departure[i] = start[i] + service[i]
//! server_free_at = departure[i]
//! ```
//!
//! Customer `i` depends on the departure of customer `i - 1`, so the pass is
//! strictly sequential. A `(max, +)` prefix-scan formulation would allow a
//! parallel pass but is not implemented here.

use crate::error::{ensure_positive_rate, SimError, SimResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Declared arrival and service rates of a run (customers per unit time).
///
/// Deserialization goes through [`RateParams::new`], so a decoded value is
/// always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRateParams")]
pub struct RateParams {
    pub arrival_rate: f64,
    pub service_rate: f64,
}

#[derive(Deserialize)]
struct RawRateParams {
    arrival_rate: f64,
    service_rate: f64,
}

impl TryFrom<RawRateParams> for RateParams {
    type Error = SimError;

    fn try_from(raw: RawRateParams) -> SimResult<Self> {
        Self::new(raw.arrival_rate, raw.service_rate)
    }
}

impl RateParams {
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if either rate is not positive and finite.
    pub fn new(arrival_rate: f64, service_rate: f64) -> SimResult<Self> {
        ensure_positive_rate("arrival_rate", arrival_rate)?;
        ensure_positive_rate("service_rate", service_rate)?;
        Ok(Self {
            arrival_rate,
            service_rate,
        })
    }

    /// Traffic intensity `λ / μ`.
    pub fn rho(&self) -> f64 {
        self.arrival_rate / self.service_rate
    }

    pub fn is_stable(&self) -> bool {
        self.arrival_rate < self.service_rate
    }
}

/// Reject rate pairs whose queue would grow without bound.
///
/// This looks only at the declared rates, never at sampled data.
pub fn check_stability(rates: &RateParams) -> SimResult<()> {
    if rates.is_stable() {
        Ok(())
    } else {
        Err(SimError::StabilityViolation {
            arrival_rate: rates.arrival_rate,
            service_rate: rates.service_rate,
        })
    }
}

/// Availability of the single server.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ServerState {
    free_at: f64,
}

impl ServerState {
    /// Earliest time the server can start the next customer.
    pub fn free_at(&self) -> f64 {
        self.free_at
    }

    /// Admit one customer and return `(service_start, departure)`.
    fn admit(&mut self, arrival: f64, service: f64) -> (f64, f64) {
        let start = arrival.max(self.free_at);
        let departure = start + service;
        debug_assert!(departure >= self.free_at, "server_free_at must not move backwards");
        self.free_at = departure;
        (start, departure)
    }
}

/// Timing of one customer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub index: usize,
    pub arrival_time: f64,
    pub service_duration: f64,
    pub service_start_time: f64,
    pub departure_time: f64,
}

impl CustomerRecord {
    pub fn wait_in_queue(&self) -> f64 {
        self.service_start_time - self.arrival_time
    }

    pub fn sojourn(&self) -> f64 {
        self.departure_time - self.arrival_time
    }
}

/// Per-customer arrays of one run, in arrival order.
///
/// Produced once by the engine and read-only afterwards. All four arrays have
/// the same non-zero length; a deserialized trace is checked for this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSimulationTrace")]
pub struct SimulationTrace {
    arrival_times: Vec<f64>,
    service_durations: Vec<f64>,
    service_start_times: Vec<f64>,
    departure_times: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSimulationTrace {
    arrival_times: Vec<f64>,
    service_durations: Vec<f64>,
    service_start_times: Vec<f64>,
    departure_times: Vec<f64>,
}

impl TryFrom<RawSimulationTrace> for SimulationTrace {
    type Error = SimError;

    fn try_from(raw: RawSimulationTrace) -> SimResult<Self> {
        let n = raw.arrival_times.len();
        if n == 0 {
            return Err(SimError::invalid("arrival_times", "at least one customer is required"));
        }
        let columns = [
            ("service_durations", raw.service_durations.len()),
            ("service_start_times", raw.service_start_times.len()),
            ("departure_times", raw.departure_times.len()),
        ];
        for (name, len) in columns {
            if len != n {
                return Err(SimError::invalid(name, format!("expected {n} entries, got {len}")));
            }
        }
        Ok(Self {
            arrival_times: raw.arrival_times,
            service_durations: raw.service_durations,
            service_start_times: raw.service_start_times,
            departure_times: raw.departure_times,
        })
    }
}

impl SimulationTrace {
    /// Number of customers in the trace (always at least one).
    pub fn len(&self) -> usize {
        self.arrival_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrival_times.is_empty()
    }

    pub fn arrival_times(&self) -> &[f64] {
        &self.arrival_times
    }

    pub fn service_durations(&self) -> &[f64] {
        &self.service_durations
    }

    pub fn service_start_times(&self) -> &[f64] {
        &self.service_start_times
    }

    pub fn departure_times(&self) -> &[f64] {
        &self.departure_times
    }

    /// `service_start_time - arrival_time` for every customer.
    pub fn wait_in_queue(&self) -> Vec<f64> {
        self.service_start_times
            .iter()
            .zip(&self.arrival_times)
            .map(|(start, arrival)| start - arrival)
            .collect()
    }

    /// `departure_time - arrival_time` for every customer.
    pub fn sojourn(&self) -> Vec<f64> {
        self.departure_times
            .iter()
            .zip(&self.arrival_times)
            .map(|(departure, arrival)| departure - arrival)
            .collect()
    }

    pub fn record(&self, index: usize) -> Option<CustomerRecord> {
        Some(CustomerRecord {
            index,
            arrival_time: *self.arrival_times.get(index)?,
            service_duration: *self.service_durations.get(index)?,
            service_start_time: *self.service_start_times.get(index)?,
            departure_time: *self.departure_times.get(index)?,
        })
    }

    pub fn records(&self) -> impl Iterator<Item = CustomerRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.record(i))
    }

    /// Departure of the last customer, i.e. the end of the simulated horizon.
    pub fn last_departure(&self) -> Option<f64> {
        self.departure_times.last().copied()
    }
}

/// Run the recurrence over materialized inputs without a rate guard.
///
/// `arrival_times` must be non-decreasing and `service_durations`
/// non-negative; both must have the same non-zero length.
///
/// # Errors
///
/// Returns [`SimError::InvalidParameter`] on empty or mismatched inputs.
pub fn run_recurrence(arrival_times: &[f64], service_durations: &[f64]) -> SimResult<SimulationTrace> {
    if arrival_times.is_empty() {
        return Err(SimError::invalid("arrival_times", "at least one customer is required"));
    }
    if arrival_times.len() != service_durations.len() {
        return Err(SimError::invalid(
            "service_durations",
            format!(
                "expected {} service durations, got {}",
                arrival_times.len(),
                service_durations.len()
            ),
        ));
    }

    let n = arrival_times.len();
    let mut service_start_times = Vec::with_capacity(n);
    let mut departure_times = Vec::with_capacity(n);
    let mut server = ServerState::default();

    for (&arrival, &service) in arrival_times.iter().zip(service_durations) {
        debug_assert!(service >= 0.0, "service durations must be non-negative");
        let (start, departure) = server.admit(arrival, service);
        service_start_times.push(start);
        departure_times.push(departure);
    }

    Ok(SimulationTrace {
        arrival_times: arrival_times.to_vec(),
        service_durations: service_durations.to_vec(),
        service_start_times,
        departure_times,
    })
}

/// Single-server queue engine bound to a pair of declared rates.
#[derive(Debug, Clone, Copy)]
pub struct SingleServerEngine {
    rates: RateParams,
}

impl SingleServerEngine {
    /// # Errors
    ///
    /// Returns [`SimError::StabilityViolation`] if `arrival_rate >= service_rate`.
    pub fn new(rates: RateParams) -> SimResult<Self> {
        check_stability(&rates)?;
        Ok(Self { rates })
    }

    pub fn rates(&self) -> RateParams {
        self.rates
    }

    /// Advance every customer through queueing, service and departure.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] on empty or mismatched inputs.
    #[instrument(skip_all, fields(customers = arrival_times.len(), rho = self.rates.rho()))]
    pub fn run(&self, arrival_times: &[f64], service_durations: &[f64]) -> SimResult<SimulationTrace> {
        let trace = run_recurrence(arrival_times, service_durations)?;
        debug!(
            last_departure = ?trace.last_departure(),
            "Recurrence pass completed"
        );
        Ok(trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_computed_trace() {
        // Customer 1 arrives while 0 is in service; customer 2 finds the server idle.
        let trace = run_recurrence(&[1.0, 2.0, 10.0], &[3.0, 1.0, 0.5]).unwrap();

        assert_eq!(trace.service_start_times(), &[1.0, 4.0, 10.0]);
        assert_eq!(trace.departure_times(), &[4.0, 5.0, 10.5]);
        assert_eq!(trace.wait_in_queue(), vec![0.0, 2.0, 0.0]);
        assert_eq!(trace.sojourn(), vec![3.0, 3.0, 0.5]);
        assert_eq!(trace.last_departure(), Some(10.5));
    }

    #[test]
    fn test_records_match_arrays() {
        let trace = run_recurrence(&[0.5, 0.75], &[1.0, 1.0]).unwrap();
        let records: Vec<_> = trace.records().collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].index, 1);
        assert_eq!(records[1].service_start_time, 1.5);
        assert_eq!(records[1].wait_in_queue(), 0.75);
        assert_eq!(records[1].sojourn(), 1.75);
        assert!(trace.record(2).is_none());
    }

    #[test]
    fn test_server_state_is_monotone() {
        let mut server = ServerState::default();
        assert_eq!(server.free_at(), 0.0);

        server.admit(2.0, 1.0);
        assert_eq!(server.free_at(), 3.0);

        // Early arrival waits for the server.
        let (start, _) = server.admit(2.5, 0.0);
        assert_eq!(start, 3.0);
        assert_eq!(server.free_at(), 3.0);
    }

    #[test]
    fn test_rejects_bad_inputs() {
        assert!(matches!(
            run_recurrence(&[], &[]),
            Err(SimError::InvalidParameter { name: "arrival_times", .. })
        ));
        assert!(matches!(
            run_recurrence(&[1.0, 2.0], &[1.0]),
            Err(SimError::InvalidParameter { name: "service_durations", .. })
        ));
    }

    #[test]
    fn test_stability_guard() {
        let stable = RateParams::new(0.5, 1.0).unwrap();
        assert!(SingleServerEngine::new(stable).is_ok());
        assert_eq!(stable.rho(), 0.5);

        let critical = RateParams::new(5.0, 5.0).unwrap();
        assert_eq!(
            SingleServerEngine::new(critical).unwrap_err(),
            SimError::StabilityViolation {
                arrival_rate: 5.0,
                service_rate: 5.0
            }
        );
    }

    #[test]
    fn test_rate_params_validation() {
        assert!(RateParams::new(0.0, 1.0).is_err());
        assert!(RateParams::new(1.0, -1.0).is_err());
    }

    #[test]
    fn test_rate_params_deserialization_is_validated() {
        let rates: RateParams = serde_json::from_str(r#"{"arrival_rate":0.5,"service_rate":1.0}"#).unwrap();
        assert_eq!(rates, RateParams::new(0.5, 1.0).unwrap());

        let err = serde_json::from_str::<RateParams>(r#"{"arrival_rate":-0.5,"service_rate":1.0}"#).unwrap_err();
        assert!(err.to_string().contains("arrival_rate"));
        assert!(serde_json::from_str::<RateParams>(r#"{"arrival_rate":0.5,"service_rate":0.0}"#).is_err());
    }

    #[test]
    fn test_trace_json_roundtrip() {
        let trace = run_recurrence(&[1.0, 2.0, 10.0], &[3.0, 1.0, 0.5]).unwrap();
        let json = serde_json::to_string(&trace).unwrap();
        assert_eq!(serde_json::from_str::<SimulationTrace>(&json).unwrap(), trace);
    }

    #[test]
    fn test_trace_deserialization_rejects_ragged_columns() {
        let ragged = r#"{
            "arrival_times": [1.0, 2.0],
            "service_durations": [1.0],
            "service_start_times": [1.0, 2.0],
            "departure_times": [2.0, 3.0]
        }"#;
        let err = serde_json::from_str::<SimulationTrace>(ragged).unwrap_err();
        assert!(err.to_string().contains("service_durations"));

        let empty = r#"{
            "arrival_times": [],
            "service_durations": [],
            "service_start_times": [],
            "departure_times": []
        }"#;
        assert!(serde_json::from_str::<SimulationTrace>(empty).is_err());
    }
}
