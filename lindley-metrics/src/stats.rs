//! Batch-means confidence intervals for steady-state queue metrics
//!
//! Successive sojourn times are strongly correlated, so a naive standard error
//! over individual customers is too optimistic. Batch means split the trimmed
//! window into contiguous batches and treat batch averages as roughly
//! independent.

use lindley_core::SimulationTrace;
use serde::{Deserialize, Serialize};

/// Inverse CDF (quantile) of the standard normal distribution.
///
/// Uses the Peter J. Acklam rational approximation.
///
/// # Panics
/// Panics if `p` is not in `(0, 1)`.
pub fn inv_norm_cdf(p: f64) -> f64 {
    assert!(p > 0.0 && p < 1.0, "p must be in (0, 1)");

    const A: [f64; 6] = [
        -3.969_683_028_665_376e+01,
        2.209_460_984_245_205e+02,
        -2.759_285_104_469_687e+02,
        1.383_577_518_672_690e+02,
        -3.066_479_806_614_716e+01,
        2.506_628_277_459_239e+00,
    ];
    const B: [f64; 5] = [
        -5.447_609_879_822_406e+01,
        1.615_858_368_580_409e+02,
        -1.556_989_798_598_866e+02,
        6.680_131_188_771_972e+01,
        -1.328_068_155_288_572e+01,
    ];
    const C: [f64; 6] = [
        -7.784_894_002_430_293e-03,
        -3.223_964_580_411_365e-01,
        -2.400_758_277_161_838e+00,
        -2.549_732_539_343_734e+00,
        4.374_664_141_464_968e+00,
        2.938_163_982_698_783e+00,
    ];
    const D: [f64; 4] = [
        7.784_695_709_041_462e-03,
        3.224_671_290_700_398e-01,
        2.445_134_137_142_996e+00,
        3.754_408_661_907_416e+00,
    ];

    const P_LOW: f64 = 0.02425;
    const P_HIGH: f64 = 1.0 - P_LOW;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        num / den
    } else if p > P_HIGH {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        let num = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let den = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        -num / den
    } else {
        let q = p - 0.5;
        let r = q * q;
        let num = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let den = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        num / den
    }
}

/// z-value for a symmetric confidence interval under a normal approximation.
///
/// For example, `confidence = 0.95` returns ~1.96.
pub fn z_for_confidence(confidence: f64) -> f64 {
    assert!(
        confidence > 0.0 && confidence < 1.0,
        "confidence must be in (0, 1)"
    );
    inv_norm_cdf(0.5 + confidence / 2.0)
}

pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

pub fn sample_variance(xs: &[f64]) -> Option<f64> {
    if xs.len() < 2 {
        return None;
    }
    let m = mean(xs)?;
    let acc: f64 = xs.iter().map(|x| (x - m) * (x - m)).sum();
    Some(acc / (xs.len() as f64 - 1.0))
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchMeansEstimate {
    pub batches: usize,
    pub batch_size: usize,
    pub mean: f64,
    pub std_err: f64,
    pub ci_low: f64,
    pub ci_high: f64,
}

impl BatchMeansEstimate {
    pub fn contains(&self, value: f64) -> bool {
        self.ci_low <= value && value <= self.ci_high
    }
}

/// Batch means estimator for a steady-state mean with an approximate normal CI.
///
/// Trailing samples that do not fill a whole batch are ignored. `batches`
/// should be reasonably large (>= 10) for the approximation to behave.
///
/// Returns `None` if `confidence` has no finite z-value, i.e. lies outside
/// `(0, 1)` or is so close to 1 that `0.5 + confidence / 2` rounds to 1.
pub fn batch_means(samples: &[f64], batches: usize, confidence: f64) -> Option<BatchMeansEstimate> {
    if !(confidence > 0.0 && 0.5 + confidence / 2.0 < 1.0) {
        return None;
    }
    if batches < 2 {
        return None;
    }
    let batch_size = samples.len() / batches;
    if batch_size == 0 {
        return None;
    }

    let means: Vec<f64> = samples
        .chunks_exact(batch_size)
        .take(batches)
        .filter_map(mean)
        .collect();

    let overall_mean = mean(&means)?;
    let std_err = (sample_variance(&means)? / means.len() as f64).sqrt();
    let z = z_for_confidence(confidence);

    Some(BatchMeansEstimate {
        batches: means.len(),
        batch_size,
        mean: overall_mean,
        std_err,
        ci_low: overall_mean - z * std_err,
        ci_high: overall_mean + z * std_err,
    })
}

/// Confidence intervals for `W` and `Wq` over the post-warm-up window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricIntervals {
    pub w: BatchMeansEstimate,
    pub wq: BatchMeansEstimate,
}

/// Attach batch-means intervals to the sojourn and queue-wait means of a trace.
///
/// Returns `None` if the trimmed window cannot be split into `batches` batches.
pub fn sojourn_intervals(
    trace: &SimulationTrace,
    warmup_count: usize,
    batches: usize,
    confidence: f64,
) -> Option<MetricIntervals> {
    let sojourn = trace.sojourn();
    let waits = trace.wait_in_queue();
    let w = batch_means(sojourn.get(warmup_count..)?, batches, confidence)?;
    let wq = batch_means(waits.get(warmup_count..)?, batches, confidence)?;
    Some(MetricIntervals { w, wq })
}
