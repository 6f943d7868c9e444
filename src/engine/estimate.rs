//! Running sums and the final Monte-Carlo estimate.
//!
//! The standard error of a plain Monte-Carlo estimate after `N` samples is
//!
//! ```text
//! Err_N(f) = |scale| * sqrt((E[f²] - E[f]²) / N)
//! ```
//!
//! where `scale` is the domain volume for uniform sampling and the weight for
//! importance sampling.

use serde::{Deserialize, Serialize};

/// Running moments of integrand values.
///
/// Sums are kept relative to the first value pushed, so a run of identical
/// values has a mean equal to that value and a variance of exactly zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    shift: f64,
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl Accumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shift: 0.0,
            sum: 0.0,
            sum_sq: 0.0,
            count: 0,
        }
    }

    /// Add one integrand value.
    pub fn push(&mut self, value: f64) {
        if self.count == 0 {
            self.shift = value;
        }
        let d = value - self.shift;
        self.sum += d;
        self.sum_sq += d * d;
        self.count += 1;
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        // Re-express the other's deviations relative to our shift.
        let delta = other.shift - self.shift;
        let n = other.count as f64;
        self.sum += other.sum + n * delta;
        self.sum_sq += other.sum_sq + 2.0 * delta * other.sum + n * delta * delta;
        self.count += other.count;
    }

    /// Number of values pushed.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Sample mean `E[f]`, zero when empty.
    #[must_use]
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.shift + self.sum / self.count as f64
        }
    }

    /// Sample mean of squares `E[f²]`, zero when empty.
    #[must_use]
    pub fn mean_square(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            let n = self.count as f64;
            self.shift * self.shift + 2.0 * self.shift * self.sum / n + self.sum_sq / n
        }
    }

    /// Population variance `E[(f - E[f])²]`, clamped at zero.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let n = self.count as f64;
        let mean_dev = self.sum / n;
        (self.sum_sq / n - mean_dev * mean_dev).max(0.0)
    }
}

/// Result of a Monte-Carlo integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    /// Point estimate of the integral.
    pub value: f64,
    /// Standard error of the estimate.
    pub error: f64,
    /// Number of integrand evaluations.
    pub npoints: usize,
    /// Master seed the points were drawn with.
    pub seed: u64,
    /// 95% confidence interval (value ± 1.96 * error).
    pub confidence_interval: (f64, f64),
}

impl Estimate {
    /// Create a new estimate.
    #[must_use]
    pub fn new(value: f64, error: f64, npoints: usize, seed: u64) -> Self {
        let ci_half = 1.96 * error;
        Self {
            value,
            error,
            npoints,
            seed,
            confidence_interval: (value - ci_half, value + ci_half),
        }
    }

    /// Build an estimate from accumulated integrand values, multiplied by
    /// `scale` (domain volume or importance weight).
    #[must_use]
    pub fn from_accumulator(acc: &Accumulator, scale: f64, seed: u64) -> Self {
        let n = acc.count().max(1) as f64;
        let value = scale * acc.mean();
        let error = scale.abs() * (acc.variance() / n).sqrt();
        Self::new(value, error, acc.count(), seed)
    }

    /// Check if value is within confidence interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.confidence_interval.0 && value <= self.confidence_interval.1
    }

    /// Get relative error.
    #[must_use]
    pub fn relative_error(&self) -> f64 {
        if self.value.abs() < f64::EPSILON {
            self.error
        } else {
            self.error / self.value.abs()
        }
    }
}
