//! Error types for the queue simulation engine

use thiserror::Error;

/// Result alias used throughout the engine.
pub type SimResult<T> = Result<T, SimError>;

/// Top-level error type for simulation operations
///
/// Every variant is a local precondition failure: inputs are deterministic
/// given a seed, so nothing here is worth retrying.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Stability violation: arrival rate {arrival_rate} must be below service rate {service_rate}")]
    StabilityViolation { arrival_rate: f64, service_rate: f64 },

    #[error("Degenerate measurement window: elapsed time {elapsed} is not positive")]
    DegenerateWindow { elapsed: f64 },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl SimError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Checks that a rate is finite and strictly positive.
pub(crate) fn ensure_positive_rate(name: &'static str, rate: f64) -> SimResult<()> {
    if rate.is_finite() && rate > 0.0 {
        Ok(())
    } else {
        Err(SimError::invalid(
            name,
            format!("rate must be positive and finite, got {rate}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rate_check() {
        assert!(ensure_positive_rate("rate", 1.5).is_ok());
        assert!(ensure_positive_rate("rate", 0.0).is_err());
        assert!(ensure_positive_rate("rate", -2.0).is_err());
        assert!(ensure_positive_rate("rate", f64::NAN).is_err());
        assert!(ensure_positive_rate("rate", f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = SimError::StabilityViolation {
            arrival_rate: 5.0,
            service_rate: 5.0,
        };
        assert_eq!(
            err.to_string(),
            "Stability violation: arrival rate 5 must be below service rate 5"
        );

        let err = SimError::invalid("warmup_count", "must be below customer_count");
        assert!(err.to_string().contains("warmup_count"));
    }
}
