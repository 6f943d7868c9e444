//! Hyper-rectangular integration domains.

use serde::{Deserialize, Serialize};

use crate::engine::rng::QuadRng;
use crate::error::{QuadError, QuadResult};

/// Axis-aligned box `Π [lower_i, upper_i]`.
///
/// Bounds may be reversed on any axis. The volume then carries a negative
/// sign, so integrals over reversed intervals come out negated, exactly as
/// `∫_b^a f = -∫_a^b f`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDomain")]
pub struct Domain {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

/// Unchecked bounds as they appear in a document.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDomain {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl TryFrom<RawDomain> for Domain {
    type Error = QuadError;

    fn try_from(raw: RawDomain) -> QuadResult<Self> {
        Self::new(raw.lower, raw.upper)
    }
}

impl Domain {
    /// Create a domain from per-axis bounds.
    ///
    /// # Errors
    ///
    /// Returns error if the bound vectors differ in length, are empty, or
    /// hold a non-finite value.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> QuadResult<Self> {
        if lower.len() != upper.len() {
            return Err(QuadError::DimensionMismatch {
                lower: lower.len(),
                upper: upper.len(),
            });
        }
        if lower.is_empty() {
            return Err(QuadError::EmptyDomain);
        }
        if let Some(axis) = lower
            .iter()
            .zip(&upper)
            .position(|(a, b)| !a.is_finite() || !b.is_finite())
        {
            return Err(QuadError::NonFiniteBound { axis });
        }

        Ok(Self { lower, upper })
    }

    /// The cube `[a, b]^dim`.
    ///
    /// # Errors
    ///
    /// Returns error if `dim` is zero or a bound is non-finite.
    pub fn cube(dim: usize, a: f64, b: f64) -> QuadResult<Self> {
        Self::new(vec![a; dim], vec![b; dim])
    }

    /// The unit cube `[0, 1]^dim`.
    ///
    /// # Errors
    ///
    /// Returns error if `dim` is zero.
    pub fn unit(dim: usize) -> QuadResult<Self> {
        Self::cube(dim, 0.0, 1.0)
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    #[must_use]
    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    /// Upper bounds.
    #[must_use]
    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Iterate `(lower_i, upper_i)` pairs.
    pub fn bounds(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.lower.iter().copied().zip(self.upper.iter().copied())
    }

    /// Signed volume `Π (upper_i - lower_i)`.
    #[must_use]
    pub fn volume(&self) -> f64 {
        self.bounds().map(|(a, b)| b - a).product()
    }

    /// Fill `point` with a uniform sample from the domain.
    ///
    /// `point` must have length [`Domain::dim`]; extra coordinates are left
    /// untouched.
    pub fn sample_into(&self, rng: &mut QuadRng, point: &mut [f64]) {
        for (x, (a, b)) in point.iter_mut().zip(self.bounds()) {
            *x = rng.gen_range_f64(a, b);
        }
    }
}
