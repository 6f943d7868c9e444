//! # mcquad
//!
//! Reproducible Monte-Carlo quadrature over hyper-rectangles, with
//! closed-form reference integrands to check it against.
//!
//! - [`quadrature::mcquad`]: uniform sampling, `I ≈ Ω ⟨f⟩`
//! - [`quadrature::mcimport`]: importance sampling, `I ≈ w ⟨f⟩_g`
//! - [`reference`]: exact integrals and standard errors for the constant,
//!   product and Gaussian families
//! - [`reference::conformance`]: tolerance checks of estimates against them
//!
//! Results depend only on the seed, the point count and the batch size,
//! never on the number of worker threads.
//!
//! ## Example
//!
//! ```rust
//! use mcquad::prelude::*;
//!
//! let domain = Domain::unit(3).unwrap();
//! let options = QuadOptions::builder().npoints(50_000).seed(42).build().unwrap();
//!
//! let integrand = ReferenceIntegrand::Product;
//! let estimate = mcquad(|x| integrand.eval(x), &domain, &options).unwrap();
//! let expected = integrand.expected(&domain, options.npoints).unwrap();
//!
//! let report = check(&estimate, &expected, &Tolerance::with_sigmas(5.0));
//! assert!(report.passed());
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::suspicious_operation_groupings,  // False positive for variance = E[X²] - E[X]²
    clippy::suboptimal_flops,
    clippy::imprecise_flops,   // Numerical code choices are intentional
    clippy::float_cmp,         // Exact zero-volume check
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
)]

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod quadrature;
pub mod reference;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{QuadJob, QuadOptions, QuadOptionsBuilder};
    pub use crate::engine::estimate::Estimate;
    pub use crate::engine::rng::QuadRng;
    pub use crate::error::{QuadError, QuadResult};
    pub use crate::quadrature::sampler::{
        Exponential, FnSampler, Independent, Marginal, Normal, Sampler, UniformBox,
    };
    pub use crate::quadrature::{mcimport, mcquad, Domain};
    pub use crate::reference::conformance::{check, ConformanceReport, Tolerance};
    pub use crate::reference::{Expected, ReferenceIntegrand, TruncatedExponential};
}

/// Re-export for public API
pub use error::{QuadError, QuadResult};
