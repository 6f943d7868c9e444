//! Compare sampled estimates against closed-form expectations.
//!
//! An estimate conforms when
//!
//! ```text
//! |value - E|  < value_sigmas   * max(Err, floor)
//! |error - Err| < error_fraction * max(Err, floor)
//! ```
//!
//! The floor keeps zero-variance integrands (where `Err = 0`) checkable.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::Expected;
use crate::engine::estimate::Estimate;
use crate::error::{QuadError, QuadResult};

/// Acceptance thresholds for a conformance check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Allowed deviation of the value, in units of the exact standard error.
    pub value_sigmas: f64,
    /// Allowed relative deviation of the reported error.
    pub error_fraction: f64,
    /// Lower bound on the standard error used for scaling.
    pub floor: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            value_sigmas: 3.0,
            error_fraction: 0.1,
            floor: 1e-10,
        }
    }
}

impl Tolerance {
    /// Default thresholds with a different value band.
    #[must_use]
    pub fn with_sigmas(value_sigmas: f64) -> Self {
        Self {
            value_sigmas,
            ..Self::default()
        }
    }
}

/// Outcome of comparing one estimate with its reference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConformanceReport {
    /// Reference the estimate was compared with.
    pub expected: Expected,
    /// `|value - E|`.
    pub value_deviation: f64,
    /// `|error - Err|`.
    pub error_deviation: f64,
    /// Largest allowed `value_deviation`.
    pub value_limit: f64,
    /// Largest allowed `error_deviation`.
    pub error_limit: f64,
}

impl ConformanceReport {
    /// Value lies inside its band.
    #[must_use]
    pub fn value_ok(&self) -> bool {
        self.value_deviation < self.value_limit
    }

    /// Reported error lies inside its band.
    #[must_use]
    pub fn error_ok(&self) -> bool {
        self.error_deviation < self.error_limit
    }

    /// Both checks hold.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.value_ok() && self.error_ok()
    }

    /// Convert a failed report into an error.
    ///
    /// # Errors
    ///
    /// Returns `ConformanceFailed` naming every failed check.
    pub fn into_result(self) -> QuadResult<Self> {
        let mut reasons = Vec::new();
        if !self.value_ok() {
            reasons.push(format!(
                "value deviates by {:.6e} (limit {:.6e})",
                self.value_deviation, self.value_limit
            ));
        }
        if !self.error_ok() {
            reasons.push(format!(
                "error deviates by {:.6e} (limit {:.6e})",
                self.error_deviation, self.error_limit
            ));
        }

        if reasons.is_empty() {
            Ok(self)
        } else {
            Err(QuadError::ConformanceFailed {
                reason: reasons.join("; "),
            })
        }
    }
}

/// Compare `estimate` with `expected` under `tolerance`.
#[must_use]
pub fn check(estimate: &Estimate, expected: &Expected, tolerance: &Tolerance) -> ConformanceReport {
    let scale = expected.error.max(tolerance.floor);
    let report = ConformanceReport {
        expected: *expected,
        value_deviation: (estimate.value - expected.value).abs(),
        error_deviation: (estimate.error - expected.error).abs(),
        value_limit: tolerance.value_sigmas * scale,
        error_limit: tolerance.error_fraction * scale,
    };

    if !report.passed() {
        warn!(
            value = estimate.value,
            expected_value = expected.value,
            error = estimate.error,
            expected_error = expected.error,
            "estimate does not conform to reference"
        );
    }
    report
}
