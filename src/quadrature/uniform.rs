//! Plain Monte-Carlo integration with uniform sampling.

use super::domain::Domain;
use super::integrate;
use crate::config::QuadOptions;
use crate::engine::estimate::Estimate;
use crate::error::QuadResult;

/// Integrate `f` over `domain` by uniform sampling.
///
/// Returns `Ω * ⟨f⟩` with standard error `|Ω| * sqrt((⟨f²⟩ - ⟨f⟩²) / N)`,
/// where `Ω` is the signed volume of `domain`. `options.weight` is not used.
///
/// # Errors
///
/// Returns error if the options are invalid (fewer than two points, zero
/// workers, zero batch size) or if `f` returns a non-finite value.
///
/// # Example
///
/// ```rust
/// use mcquad::config::QuadOptions;
/// use mcquad::quadrature::{mcquad, Domain};
///
/// let domain = Domain::unit(2).unwrap();
/// let options = QuadOptions::builder().npoints(20_000).seed(42).build().unwrap();
///
/// // ∫∫ x*y over the unit square = 1/4
/// let estimate = mcquad(|x| x[0] * x[1], &domain, &options).unwrap();
/// assert!((estimate.value - 0.25).abs() < 4.0 * estimate.error);
/// ```
pub fn mcquad<F>(f: F, domain: &Domain, options: &QuadOptions) -> QuadResult<Estimate>
where
    F: Fn(&[f64]) -> f64 + Sync,
{
    integrate(
        domain.dim(),
        options,
        domain.volume(),
        |rng, point| domain.sample_into(rng, point),
        f,
    )
}
