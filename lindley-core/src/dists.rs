//! Sample generation for interarrival gaps and service durations
//!
//! The engine only relies on samples being non-negative. The distributions in
//! this module draw from a caller-owned generator; they hold no random state of
//! their own.

use crate::error::{ensure_positive_rate, SimError, SimResult};
use rand::Rng;
use rand_distr::Distribution;

/// A probability law over non-negative reals.
pub trait NonNegativeDistribution {
    /// Draw one sample, advancing `rng`.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64;

    /// Expected value of the law.
    fn mean(&self) -> f64;
}

/// Exponential distribution with the given rate (mean `1 / rate`).
///
/// Used both for interarrival gaps of a Poisson process and for Markovian
/// service durations.
#[derive(Debug, Clone, Copy)]
pub struct Exponential {
    rate: f64,
    exp_dist: rand_distr::Exp<f64>,
}

impl Exponential {
    /// Create an exponential law.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if `rate` is not positive and finite.
    pub fn new(rate: f64) -> SimResult<Self> {
        ensure_positive_rate("rate", rate)?;
        let exp_dist = rand_distr::Exp::new(rate)
            .map_err(|e| SimError::invalid("rate", e.to_string()))?;
        Ok(Self { rate, exp_dist })
    }

    /// Get the rate parameter
    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl NonNegativeDistribution for Exponential {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.exp_dist.sample(rng)
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }
}

/// Degenerate law that always yields the same value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constant {
    value: f64,
}

impl Constant {
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] if `value` is negative or not finite.
    pub fn new(value: f64) -> SimResult<Self> {
        if !(value.is_finite() && value >= 0.0) {
            return Err(SimError::invalid(
                "value",
                format!("constant sample must be non-negative and finite, got {value}"),
            ));
        }
        Ok(Self { value })
    }
}

impl NonNegativeDistribution for Constant {
    fn sample<R: Rng + ?Sized>(&self, _rng: &mut R) -> f64 {
        self.value
    }

    fn mean(&self) -> f64 {
        self.value
    }
}

/// Draw `n` independent samples from `dist`.
///
/// # Errors
///
/// Returns [`SimError::InvalidParameter`] if `n` is zero.
pub fn sample_n<D, R>(dist: &D, n: usize, rng: &mut R) -> SimResult<Vec<f64>>
where
    D: NonNegativeDistribution + ?Sized,
    R: Rng + ?Sized,
{
    if n < 1 {
        return Err(SimError::invalid("n", "at least one sample is required"));
    }
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Turn interarrival gaps into absolute arrival times (running sum).
pub fn arrival_times_from_gaps(gaps: &[f64]) -> Vec<f64> {
    gaps.iter()
        .scan(0.0_f64, |clock, gap| {
            *clock += gap;
            Some(*clock)
        })
        .collect()
}
