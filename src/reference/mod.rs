//! Closed-form expectations for reference integrands.
//!
//! Each family has a known integral over any hyper-rectangle, so sampled
//! estimates can be compared against an exact value and an exact standard
//! error:
//!
//! | Integrand `f(x)`      | `∫_Ω f`                                          | `∫_Ω f²`                                                  |
//! |-----------------------|--------------------------------------------------|-----------------------------------------------------------|
//! | `c`                   | `c Ω`                                            | `c² Ω`                                                    |
//! | `Π x_i`               | `Π (b_i² - a_i²) / 2`                            | `Π (b_i³ - a_i³) / 3`                                     |
//! | `Π exp(-β² x_i²)`     | `Π (√π / 2β)(erf(β b_i) - erf(β a_i))`           | `Π (√(π/2) / 2β)(erf(√2 β b_i) - erf(√2 β a_i))`          |
//!
//! With `E[f] = ∫f / Ω` and `E[f²] = ∫f² / Ω` the standard error after `N`
//! uniform samples is `Err_N(f) = Ω * sqrt((E[f²] - E[f]²) / N)`.

use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, SQRT_2};

use crate::error::{QuadError, QuadResult};
use crate::quadrature::domain::Domain;
use crate::quadrature::sampler::Exponential;

pub mod conformance;

/// Exact value and standard error an estimate should reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Expected {
    /// Exact integral.
    pub value: f64,
    /// Exact standard error for the given sample count.
    pub error: f64,
}

/// Integrand family with closed-form moments over a hyper-rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceIntegrand {
    /// `f(x) = value`.
    Constant {
        /// The constant.
        #[serde(default = "default_constant")]
        value: f64,
    },
    /// `f(x) = Π x_i`.
    Product,
    /// `f(x) = Π exp(-β² x_i²)`.
    Gaussian {
        /// Width parameter, must be positive.
        beta: f64,
    },
}

const fn default_constant() -> f64 {
    1.0
}

impl ReferenceIntegrand {
    /// Short lowercase name of the family.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Constant { .. } => "constant",
            Self::Product => "product",
            Self::Gaussian { .. } => "gaussian",
        }
    }

    /// Check the family's parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a non-finite constant or a `beta` that
    /// is not finite and positive.
    pub fn validate(&self) -> QuadResult<()> {
        match *self {
            Self::Constant { value } if !value.is_finite() => Err(QuadError::InvalidParameter {
                name: "value",
                value,
            }),
            Self::Gaussian { beta } if !(beta.is_finite() && beta > 0.0) => {
                Err(QuadError::InvalidParameter { name: "beta", value: beta })
            }
            _ => Ok(()),
        }
    }

    /// Evaluate the integrand at `x`.
    #[must_use]
    pub fn eval(&self, x: &[f64]) -> f64 {
        match *self {
            Self::Constant { value } => value,
            Self::Product => x.iter().product(),
            Self::Gaussian { beta } => {
                let b2 = beta * beta;
                x.iter().map(|&xi| (-b2 * xi * xi).exp()).product()
            }
        }
    }

    /// Exact `∫_Ω f`.
    #[must_use]
    pub fn integral(&self, domain: &Domain) -> f64 {
        match *self {
            Self::Constant { value } => value * domain.volume(),
            Self::Product => domain.bounds().map(|(a, b)| (b * b - a * a) / 2.0).product(),
            Self::Gaussian { beta } => domain
                .bounds()
                .map(|(a, b)| gaussian_axis(beta, a, b))
                .product(),
        }
    }

    /// Exact `∫_Ω f²`.
    #[must_use]
    pub fn integral_of_square(&self, domain: &Domain) -> f64 {
        match *self {
            Self::Constant { value } => value * value * domain.volume(),
            Self::Product => domain
                .bounds()
                .map(|(a, b)| (b * b * b - a * a * a) / 3.0)
                .product(),
            // exp(-β²x²)² = exp(-(√2β)²x²)
            Self::Gaussian { beta } => domain
                .bounds()
                .map(|(a, b)| gaussian_axis(SQRT_2 * beta, a, b))
                .product(),
        }
    }

    /// `E[f]` under uniform sampling; zero for a zero-volume domain.
    #[must_use]
    pub fn mean(&self, domain: &Domain) -> f64 {
        per_volume(self.integral(domain), domain.volume())
    }

    /// `E[f²]` under uniform sampling; zero for a zero-volume domain.
    #[must_use]
    pub fn mean_square(&self, domain: &Domain) -> f64 {
        per_volume(self.integral_of_square(domain), domain.volume())
    }

    /// `E[f²] - E[f]²`, clamped at zero; exactly zero for a constant.
    #[must_use]
    pub fn variance(&self, domain: &Domain) -> f64 {
        if let Self::Constant { .. } = self {
            return 0.0;
        }
        let mean = self.mean(domain);
        (self.mean_square(domain) - mean * mean).max(0.0)
    }

    /// `Err_N(f) = |Ω| * sqrt((E[f²] - E[f]²) / N)`.
    ///
    /// Computed as `sqrt((Ω ∫f² - (∫f)²) / N)`, which stays finite for a
    /// zero-volume domain.
    #[must_use]
    pub fn standard_error(&self, domain: &Domain, npoints: usize) -> f64 {
        if let Self::Constant { .. } = self {
            return 0.0;
        }
        let spread = domain.volume() * self.integral_of_square(domain)
            - self.integral(domain).powi(2);
        (spread.max(0.0) / npoints.max(1) as f64).sqrt()
    }

    /// Exact integral and standard error after `npoints` uniform samples.
    ///
    /// # Errors
    ///
    /// Returns error if the parameters are invalid or `npoints < 2`.
    pub fn expected(&self, domain: &Domain, npoints: usize) -> QuadResult<Expected> {
        self.validate()?;
        if npoints < 2 {
            return Err(QuadError::TooFewPoints { npoints });
        }
        Ok(Expected {
            value: self.integral(domain),
            error: self.standard_error(domain, npoints),
        })
    }
}

/// `∫_a^b exp(-β² x²) dx = (√π / 2β)(erf(βb) - erf(βa))`.
fn gaussian_axis(beta: f64, a: f64, b: f64) -> f64 {
    PI.sqrt() / (2.0 * beta) * (libm::erf(beta * b) - libm::erf(beta * a))
}

fn per_volume(integral: f64, volume: f64) -> f64 {
    if volume == 0.0 {
        0.0
    } else {
        integral / volume
    }
}

/// Scaled indicator `weight * 1[x_i < 1 for all i]` under `Exp(scale)` sampling.
///
/// With `p = (1 - e^{-1/scale})^d` the probability that every coordinate is
/// below one, `E = weight * p` and `Var = weight² p - E²`. For `scale = 1`
/// and `weight = 1` this is `∫_{[0,1]^d} e^{-Σx}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruncatedExponential {
    /// Scale (mean) of each exponential coordinate.
    pub scale: f64,
    /// Constant multiplying the indicator.
    pub weight: f64,
}

impl Default for TruncatedExponential {
    fn default() -> Self {
        Self {
            scale: 1.0,
            weight: 1.0,
        }
    }
}

impl TruncatedExponential {
    /// Evaluate `weight * 1[x_i < 1 for all i]`.
    #[must_use]
    pub fn eval(&self, x: &[f64]) -> f64 {
        if x.iter().all(|&xi| xi < 1.0) {
            self.weight
        } else {
            0.0
        }
    }

    /// Sampler matching this reference in `dim` dimensions.
    #[must_use]
    pub const fn sampler(&self, dim: usize) -> Exponential {
        Exponential {
            dim,
            scale: self.scale,
        }
    }

    fn hit_probability(&self, dim: usize) -> f64 {
        (1.0 - (-1.0 / self.scale).exp()).powi(dim as i32)
    }

    /// `E_g[f]`.
    #[must_use]
    pub fn mean(&self, dim: usize) -> f64 {
        self.weight * self.hit_probability(dim)
    }

    /// `Var_g(f)`.
    #[must_use]
    pub fn variance(&self, dim: usize) -> f64 {
        let mean = self.mean(dim);
        (self.weight * self.weight * self.hit_probability(dim) - mean * mean).max(0.0)
    }

    /// Exact expectation and standard error after `npoints` samples.
    ///
    /// # Errors
    ///
    /// Returns error if `scale` is not finite and positive, `weight` is not
    /// finite, `dim` is zero or `npoints < 2`.
    pub fn expected(&self, dim: usize, npoints: usize) -> QuadResult<Expected> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(QuadError::InvalidParameter {
                name: "scale",
                value: self.scale,
            });
        }
        if !self.weight.is_finite() {
            return Err(QuadError::InvalidWeight);
        }
        if dim == 0 {
            return Err(QuadError::SamplerDimension);
        }
        if npoints < 2 {
            return Err(QuadError::TooFewPoints { npoints });
        }
        Ok(Expected {
            value: self.mean(dim),
            error: (self.variance(dim) / npoints as f64).sqrt(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_constant_moments() {
        let domain = Domain::cube(6, -1.0, 2.0).unwrap();
        let one = ReferenceIntegrand::Constant { value: 1.0 };

        assert!((one.integral(&domain) - 729.0).abs() < 1e-9);
        assert!((one.mean(&domain) - 1.0).abs() < TOL);
        assert!((one.mean_square(&domain) - 1.0).abs() < TOL);
        assert!(one.variance(&domain).abs() < TOL);
        assert!(one.standard_error(&domain, 2000).abs() < TOL);
    }

    #[test]
    fn test_non_dyadic_constant_error_is_zero() {
        let tenth = ReferenceIntegrand::Constant { value: 0.1 };
        for domain in [
            Domain::cube(6, -1.0, 2.0).unwrap(),
            Domain::new(vec![-1.0], vec![2.0]).unwrap(),
        ] {
            let expected = tenth.expected(&domain, 2000).unwrap();
            assert_eq!(expected.value, 0.1 * domain.volume());
            assert_eq!(expected.error, 0.0);
            assert_eq!(tenth.variance(&domain), 0.0);
        }
    }

    #[test]
    fn test_product_unit_cube() {
        for d in 1..=6 {
            let domain = Domain::unit(d).unwrap();
            let di = d as i32;

            assert!((ReferenceIntegrand::Product.integral(&domain) - 0.5_f64.powi(di)).abs() < TOL);
            assert!(
                (ReferenceIntegrand::Product.mean_square(&domain) - (1.0 / 3.0_f64).powi(di)).abs()
                    < TOL
            );

            let variance = (1.0 / 3.0_f64).powi(di) - 0.25_f64.powi(di);
            assert!((ReferenceIntegrand::Product.variance(&domain) - variance).abs() < TOL);

            let n = 50_000;
            let expected_err = (variance / n as f64).sqrt();
            assert!(
                (ReferenceIntegrand::Product.standard_error(&domain, n) - expected_err).abs()
                    < TOL
            );
        }
    }

    #[test]
    fn test_product_general_interval() {
        // ∫_1^3 x dx = 4, ∫_1^3 x² dx = 26/3
        let domain = Domain::new(vec![1.0], vec![3.0]).unwrap();
        assert!((ReferenceIntegrand::Product.integral(&domain) - 4.0).abs() < TOL);
        assert!((ReferenceIntegrand::Product.integral_of_square(&domain) - 26.0 / 3.0).abs() < TOL);
        assert!((ReferenceIntegrand::Product.mean(&domain) - 2.0).abs() < TOL);
    }

    #[test]
    fn test_gaussian_whole_line_limit() {
        // ∫_{-L}^{L} exp(-x²) → √π for large L
        let domain = Domain::new(vec![-10.0], vec![10.0]).unwrap();
        let g = ReferenceIntegrand::Gaussian { beta: 1.0 };
        assert!((g.integral(&domain) - PI.sqrt()).abs() < 1e-12);
        // ∫ exp(-2x²) = √(π/2)
        assert!((g.integral_of_square(&domain) - (PI / 2.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_unit_interval() {
        // ∫_0^1 exp(-x²) dx = (√π / 2) erf(1) ≈ 0.746824132812427
        let domain = Domain::unit(1).unwrap();
        let g = ReferenceIntegrand::Gaussian { beta: 1.0 };
        assert!((g.integral(&domain) - 0.746_824_132_812_427).abs() < 1e-12);
    }

    #[test]
    fn test_gaussian_factorises() {
        let g = ReferenceIntegrand::Gaussian { beta: 0.7 };
        let one_d = g.integral(&Domain::new(vec![-0.5], vec![1.5]).unwrap());
        let three_d = g.integral(&Domain::cube(3, -0.5, 1.5).unwrap());
        assert!((three_d - one_d.powi(3)).abs() < TOL);
    }

    #[test]
    fn test_eval() {
        let x = [0.5, 2.0, 3.0];
        assert!((ReferenceIntegrand::Product.eval(&x) - 3.0).abs() < TOL);
        assert!((ReferenceIntegrand::Constant { value: 4.0 }.eval(&x) - 4.0).abs() < TOL);

        let g = ReferenceIntegrand::Gaussian { beta: 1.0 };
        assert!((g.eval(&[1.0, 0.0]) - (-1.0_f64).exp()).abs() < TOL);
    }

    #[test]
    fn test_validate() {
        assert!(ReferenceIntegrand::Product.validate().is_ok());
        assert!(ReferenceIntegrand::Gaussian { beta: 2.0 }.validate().is_ok());
        assert!(matches!(
            ReferenceIntegrand::Gaussian { beta: 0.0 }.validate(),
            Err(QuadError::InvalidParameter { name: "beta", .. })
        ));
        assert!(ReferenceIntegrand::Gaussian { beta: f64::NAN }.validate().is_err());
        assert!(ReferenceIntegrand::Constant { value: f64::INFINITY }.validate().is_err());
    }

    #[test]
    fn test_expected_rejects_too_few_points() {
        let domain = Domain::unit(1).unwrap();
        assert!(matches!(
            ReferenceIntegrand::Product.expected(&domain, 1),
            Err(QuadError::TooFewPoints { npoints: 1 })
        ));
    }

    #[test]
    fn test_reversed_domain_negates_integral_not_error() {
        let forward = Domain::unit(1).unwrap();
        let backward = Domain::new(vec![1.0], vec![0.0]).unwrap();
        let p = ReferenceIntegrand::Product;

        assert!((p.integral(&backward) + p.integral(&forward)).abs() < TOL);
        assert!((p.standard_error(&backward, 100) - p.standard_error(&forward, 100)).abs() < TOL);
    }

    #[test]
    fn test_zero_volume_domain() {
        let flat = Domain::new(vec![0.0, 0.3], vec![1.0, 0.3]).unwrap();
        let p = ReferenceIntegrand::Product;
        assert!(p.integral(&flat).abs() < TOL);
        assert!(p.mean(&flat).abs() < TOL);
        assert!(p.standard_error(&flat, 10).abs() < TOL);
    }

    #[test]
    fn test_yaml_tagging() {
        let g: ReferenceIntegrand = serde_yaml::from_str("kind: gaussian\nbeta: 1.5\n").unwrap();
        assert_eq!(g, ReferenceIntegrand::Gaussian { beta: 1.5 });

        let c: ReferenceIntegrand = serde_yaml::from_str("kind: constant\n").unwrap();
        assert_eq!(c, ReferenceIntegrand::Constant { value: 1.0 });

        let p: ReferenceIntegrand = serde_yaml::from_str("kind: product\n").unwrap();
        assert_eq!(p.name(), "product");
    }

    #[test]
    fn test_truncated_exponential_moments() {
        let unit = TruncatedExponential::default();
        let p1 = 1.0 - (-1.0_f64).exp();

        assert!((unit.mean(1) - p1).abs() < TOL);
        assert!((unit.mean(6) - p1.powi(6)).abs() < TOL);
        assert!((unit.variance(2) - (p1.powi(2) - p1.powi(4))).abs() < TOL);
    }

    #[test]
    fn test_truncated_exponential_scaled() {
        // f = c 1[x<1], x ~ Exp(scale c): Var = c E - E²
        let c = 2.0;
        let reference = TruncatedExponential { scale: c, weight: c };
        let mean = c * (1.0 - (-1.0 / c).exp());

        assert!((reference.mean(1) - mean).abs() < TOL);
        assert!((reference.variance(1) - (c * mean - mean * mean)).abs() < TOL);
        assert_eq!(reference.sampler(3).dim, 3);
    }

    #[test]
    fn test_truncated_exponential_eval() {
        let reference = TruncatedExponential { scale: 1.0, weight: 3.0 };
        assert!((reference.eval(&[0.2, 0.9]) - 3.0).abs() < TOL);
        assert!(reference.eval(&[0.2, 1.0]).abs() < TOL);
    }

    #[test]
    fn test_truncated_exponential_expected_errors() {
        let bad_scale = TruncatedExponential { scale: 0.0, weight: 1.0 };
        assert!(bad_scale.expected(1, 100).is_err());
        assert!(TruncatedExponential::default().expected(0, 100).is_err());
        assert!(TruncatedExponential::default().expected(1, 1).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Product integral factorises over axes.
        #[test]
        fn prop_product_factorises(a in -3.0f64..3.0, w1 in 0.1f64..3.0, w2 in 0.1f64..3.0) {
            let x = Domain::new(vec![a], vec![a + w1]).unwrap();
            let y = Domain::new(vec![a], vec![a + w2]).unwrap();
            let xy = Domain::new(vec![a, a], vec![a + w1, a + w2]).unwrap();

            let p = ReferenceIntegrand::Product;
            let lhs = p.integral(&xy);
            let rhs = p.integral(&x) * p.integral(&y);
            prop_assert!((lhs - rhs).abs() < 1e-9 * (1.0 + rhs.abs()));
        }

        /// Variance is never negative.
        #[test]
        fn prop_variance_non_negative(a in -3.0f64..3.0, w in 0.01f64..5.0, beta in 0.1f64..4.0) {
            let domain = Domain::new(vec![a], vec![a + w]).unwrap();
            let gaussian = ReferenceIntegrand::Gaussian { beta };
            prop_assert!(gaussian.variance(&domain) >= 0.0);
            prop_assert!(ReferenceIntegrand::Product.variance(&domain) >= 0.0);
        }

        /// Standard error shrinks as 1/sqrt(N).
        #[test]
        fn prop_error_scaling(n in 2usize..100_000) {
            let domain = Domain::unit(2).unwrap();
            let p = ReferenceIntegrand::Product;
            let ratio = p.standard_error(&domain, n) / p.standard_error(&domain, 4 * n);
            prop_assert!((ratio - 2.0).abs() < 1e-9);
        }
    }
}
