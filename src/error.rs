//! Error types for mcquad.
//!
//! All fallible operations return `Result<T, QuadError>` instead of panicking.

use thiserror::Error;

/// Result type alias for mcquad operations.
pub type QuadResult<T> = Result<T, QuadError>;

/// Unified error type for all mcquad operations.
#[derive(Debug, Error)]
pub enum QuadError {
    // ===== Domain Errors =====
    /// Lower and upper bound vectors differ in length.
    #[error("Domain error: lower bounds have {lower} dimensions but upper bounds have {upper}")]
    DimensionMismatch {
        /// Number of lower bounds.
        lower: usize,
        /// Number of upper bounds.
        upper: usize,
    },

    /// Integration domain has no dimensions.
    #[error("Domain error: integration domain must have at least one dimension")]
    EmptyDomain,

    /// A bound is NaN or infinite.
    #[error("Domain error: bound on axis {axis} is not finite")]
    NonFiniteBound {
        /// Axis holding the offending bound.
        axis: usize,
    },

    // ===== Option Errors =====
    /// Fewer than two integration points requested.
    #[error("Invalid options: at least 2 points are required, got {npoints}")]
    TooFewPoints {
        /// Requested number of points.
        npoints: usize,
    },

    /// Zero worker threads requested.
    #[error("Invalid options: at least one worker is required")]
    NoWorkers,

    /// Zero batch size requested.
    #[error("Invalid options: batch size must be positive")]
    InvalidBatchSize,

    /// Importance-sampling weight is NaN or infinite.
    #[error("Invalid options: weight must be finite")]
    InvalidWeight,

    /// A reference-integrand parameter is out of range.
    #[error("Invalid parameter '{name}': {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },

    /// Sampling distribution has no dimensions.
    #[error("Sampler error: distribution must produce at least one coordinate")]
    SamplerDimension,

    // ===== Numerical Errors =====
    /// Integrand produced NaN or infinity.
    #[error("Non-finite integrand value at {location}")]
    NonFiniteValue {
        /// Batch and sample index of the offending evaluation.
        location: String,
    },

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // ===== Conformance Errors =====
    /// Estimate disagrees with its closed-form reference.
    #[error("Conformance failed: {reason}")]
    ConformanceFailed {
        /// Which check failed and by how much.
        reason: String,
    },
}

impl QuadError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error stems from invalid caller input rather than a
    /// failure during integration.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::DimensionMismatch { .. }
                | Self::EmptyDomain
                | Self::NonFiniteBound { .. }
                | Self::TooFewPoints { .. }
                | Self::NoWorkers
                | Self::InvalidBatchSize
                | Self::InvalidWeight
                | Self::InvalidParameter { .. }
                | Self::SamplerDimension
        )
    }
}
