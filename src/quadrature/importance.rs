//! Importance sampling.
//!
//! To estimate `I = ∫ h(x) dx`, pick a density `g` that is easy to sample and
//! integrate `f = h / g` against it: `I = E_g[f]`. The caller supplies `f`
//! directly, already divided by `g`. A constant `weight` multiplies both the
//! estimate and its error, which is convenient when `g` is known only up to a
//! normalizing constant.

use super::integrate;
use super::sampler::Sampler;
use crate::config::QuadOptions;
use crate::engine::estimate::Estimate;
use crate::error::{QuadError, QuadResult};

/// Estimate `weight * E_g[f]` with points drawn from `sampler`.
///
/// The standard error is `|weight| * sqrt(Var_g(f) / N)`.
///
/// # Errors
///
/// Returns error if the options are invalid, the weight is not finite, the
/// sampler has no dimensions or invalid parameters, or `f` returns a
/// non-finite value.
///
/// # Example
///
/// ```rust
/// use mcquad::config::QuadOptions;
/// use mcquad::quadrature::mcimport;
/// use mcquad::quadrature::sampler::Exponential;
///
/// // ∫_0^1 e^{-x} dx = 1 - 1/e, sampling x ~ Exp(1) and counting x < 1.
/// let options = QuadOptions::builder().npoints(20_000).seed(7).build().unwrap();
/// let estimate = mcimport(
///     |x| if x[0] < 1.0 { 1.0 } else { 0.0 },
///     &Exponential::standard(1),
///     &options,
/// )
/// .unwrap();
/// let exact = 1.0 - (-1.0_f64).exp();
/// assert!((estimate.value - exact).abs() < 4.0 * estimate.error);
/// ```
pub fn mcimport<F, S>(f: F, sampler: &S, options: &QuadOptions) -> QuadResult<Estimate>
where
    F: Fn(&[f64]) -> f64 + Sync,
    S: Sampler + ?Sized,
{
    if sampler.dim() == 0 {
        return Err(QuadError::SamplerDimension);
    }
    sampler.validate()?;

    integrate(
        sampler.dim(),
        options,
        options.weight,
        |rng, point| sampler.sample(rng, point),
        f,
    )
}
