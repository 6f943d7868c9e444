//! Sampling distributions for importance sampling.
//!
//! A [`Sampler`] fills a point buffer with one draw from a probability
//! distribution `g`. The importance-sampling estimate of `w * E_g[f]` then
//! averages `f` over those draws.

use serde::{Deserialize, Serialize};

use super::domain::Domain;
use crate::engine::rng::QuadRng;
use crate::error::{QuadError, QuadResult};

/// A probability distribution over `R^dim` that can be sampled.
pub trait Sampler: Sync {
    /// Number of coordinates in each draw.
    fn dim(&self) -> usize;

    /// Fill `point` (length [`Sampler::dim`]) with one draw.
    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]);

    /// Check the distribution's parameters before any draw.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first out-of-range parameter.
    fn validate(&self) -> QuadResult<()> {
        Ok(())
    }
}

fn check_scale(scale: f64) -> QuadResult<()> {
    if scale.is_finite() && scale > 0.0 {
        Ok(())
    } else {
        Err(QuadError::InvalidParameter { name: "scale", value: scale })
    }
}

fn check_normal(mean: f64, std: f64) -> QuadResult<()> {
    if !mean.is_finite() {
        return Err(QuadError::InvalidParameter { name: "mean", value: mean });
    }
    if !(std.is_finite() && std >= 0.0) {
        return Err(QuadError::InvalidParameter { name: "std", value: std });
    }
    Ok(())
}

/// One-dimensional marginal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Marginal {
    /// Exponential with the given scale (mean).
    Exponential {
        /// Scale parameter.
        scale: f64,
    },
    /// Uniform on `[low, high)`.
    Uniform {
        /// Lower bound.
        low: f64,
        /// Upper bound.
        high: f64,
    },
    /// Normal with the given mean and standard deviation.
    Normal {
        /// Mean.
        mean: f64,
        /// Standard deviation.
        std: f64,
    },
}

impl Marginal {
    /// Draw one value.
    pub fn draw(&self, rng: &mut QuadRng) -> f64 {
        match *self {
            Self::Exponential { scale } => rng.gen_exponential(scale),
            Self::Uniform { low, high } => rng.gen_range_f64(low, high),
            Self::Normal { mean, std } => rng.gen_normal(mean, std),
        }
    }

    /// Check the marginal's parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a scale that is not finite and
    /// positive, a non-finite uniform bound, or a normal with non-finite
    /// mean or negative standard deviation.
    pub fn validate(&self) -> QuadResult<()> {
        match *self {
            Self::Exponential { scale } => check_scale(scale),
            Self::Uniform { low, high } => {
                if !low.is_finite() {
                    return Err(QuadError::InvalidParameter { name: "low", value: low });
                }
                if !high.is_finite() {
                    return Err(QuadError::InvalidParameter { name: "high", value: high });
                }
                Ok(())
            }
            Self::Normal { mean, std } => check_normal(mean, std),
        }
    }
}

/// Independent, identically distributed exponential coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exponential {
    /// Number of coordinates.
    pub dim: usize,
    /// Scale (mean) of every coordinate.
    pub scale: f64,
}

impl Exponential {
    /// Unit-scale exponential in `dim` dimensions.
    #[must_use]
    pub const fn standard(dim: usize) -> Self {
        Self { dim, scale: 1.0 }
    }
}

impl Sampler for Exponential {
    fn dim(&self) -> usize {
        self.dim
    }

    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]) {
        for x in point.iter_mut().take(self.dim) {
            *x = rng.gen_exponential(self.scale);
        }
    }

    fn validate(&self) -> QuadResult<()> {
        check_scale(self.scale)
    }
}

/// Independent, identically distributed normal coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normal {
    /// Number of coordinates.
    pub dim: usize,
    /// Mean of every coordinate.
    pub mean: f64,
    /// Standard deviation of every coordinate.
    pub std: f64,
}

impl Sampler for Normal {
    fn dim(&self) -> usize {
        self.dim
    }

    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]) {
        for x in point.iter_mut().take(self.dim) {
            *x = rng.gen_normal(self.mean, self.std);
        }
    }

    fn validate(&self) -> QuadResult<()> {
        check_normal(self.mean, self.std)
    }
}

/// Uniform draws from a hyper-rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBox(pub Domain);

impl Sampler for UniformBox {
    fn dim(&self) -> usize {
        self.0.dim()
    }

    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]) {
        self.0.sample_into(rng, point);
    }
}

/// Product of independent, possibly different, marginals.
///
/// # Example
///
/// ```rust
/// use mcquad::quadrature::sampler::{Independent, Marginal, Sampler};
///
/// let mixed = Independent(vec![
///     Marginal::Exponential { scale: 1.0 },
///     Marginal::Uniform { low: 0.0, high: 1.0 },
/// ]);
/// assert_eq!(mixed.dim(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Independent(pub Vec<Marginal>);

impl Sampler for Independent {
    fn dim(&self) -> usize {
        self.0.len()
    }

    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]) {
        for (x, marginal) in point.iter_mut().zip(&self.0) {
            *x = marginal.draw(rng);
        }
    }

    fn validate(&self) -> QuadResult<()> {
        self.0.iter().try_for_each(Marginal::validate)
    }
}

/// Sampler backed by a closure.
pub struct FnSampler<F> {
    dim: usize,
    draw: F,
}

impl<F> FnSampler<F>
where
    F: Fn(&mut QuadRng, &mut [f64]) + Sync,
{
    /// Wrap `draw`, which fills a buffer of length `dim`.
    pub const fn new(dim: usize, draw: F) -> Self {
        Self { dim, draw }
    }
}

impl<F> std::fmt::Debug for FnSampler<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnSampler").field("dim", &self.dim).finish_non_exhaustive()
    }
}

impl<F> Sampler for FnSampler<F>
where
    F: Fn(&mut QuadRng, &mut [f64]) + Sync,
{
    fn dim(&self) -> usize {
        self.dim
    }

    fn sample(&self, rng: &mut QuadRng, point: &mut [f64]) {
        (self.draw)(rng, point);
    }
}
