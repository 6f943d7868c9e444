//! Integration options and YAML job files.
//!
//! Mistake-proofing happens in three layers:
//! - Type-safe structs with `deny_unknown_fields`
//! - Schema constraints checked by `validator`
//! - Semantic checks (domain shape, integrand parameters)

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::engine::scheduler::DEFAULT_BATCH_SIZE;
use crate::error::{QuadError, QuadResult};
use crate::quadrature::domain::Domain;
use crate::reference::{Expected, ReferenceIntegrand};

/// Settings shared by [`mcquad`](crate::quadrature::mcquad) and
/// [`mcimport`](crate::quadrature::mcimport).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadOptions {
    /// Number of integrand evaluations (at least 2).
    pub npoints: usize,
    /// Master seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
    /// Worker threads (at least 1).
    pub workers: usize,
    /// Points per batch; `None` uses [`DEFAULT_BATCH_SIZE`].
    pub batch_size: Option<usize>,
    /// Multiplier for importance-sampling estimates.
    pub weight: f64,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            npoints: default_npoints(),
            seed: None,
            workers: default_workers(),
            batch_size: None,
            weight: 1.0,
        }
    }
}

const fn default_npoints() -> usize {
    10_000
}

const fn default_workers() -> usize {
    1
}

impl QuadOptions {
    /// Create a builder for options.
    #[must_use]
    pub fn builder() -> QuadOptionsBuilder {
        QuadOptionsBuilder::default()
    }

    /// Check every option.
    ///
    /// # Errors
    ///
    /// Returns error if `npoints < 2`, `workers == 0`, `batch_size == Some(0)`
    /// or `weight` is not finite.
    pub fn check(&self) -> QuadResult<()> {
        if self.npoints < 2 {
            return Err(QuadError::TooFewPoints {
                npoints: self.npoints,
            });
        }
        if self.workers == 0 {
            return Err(QuadError::NoWorkers);
        }
        if self.batch_size == Some(0) {
            return Err(QuadError::InvalidBatchSize);
        }
        if !self.weight.is_finite() {
            return Err(QuadError::InvalidWeight);
        }
        Ok(())
    }

    /// Batch size actually used.
    #[must_use]
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}

/// Builder for [`QuadOptions`].
#[derive(Debug, Clone, Default)]
pub struct QuadOptionsBuilder {
    npoints: Option<usize>,
    seed: Option<u64>,
    workers: Option<usize>,
    batch_size: Option<usize>,
    weight: Option<f64>,
}

impl QuadOptionsBuilder {
    /// Set the number of points.
    #[must_use]
    pub const fn npoints(mut self, npoints: usize) -> Self {
        self.npoints = Some(npoints);
        self
    }

    /// Set the master seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the worker count.
    #[must_use]
    pub const fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Set the batch size.
    #[must_use]
    pub const fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Set the importance-sampling weight.
    #[must_use]
    pub const fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Build and check the options.
    ///
    /// # Errors
    ///
    /// Returns error if any option is out of range.
    pub fn build(self) -> QuadResult<QuadOptions> {
        let defaults = QuadOptions::default();
        let options = QuadOptions {
            npoints: self.npoints.unwrap_or(defaults.npoints),
            seed: self.seed,
            workers: self.workers.unwrap_or(defaults.workers),
            batch_size: self.batch_size,
            weight: self.weight.unwrap_or(defaults.weight),
        };
        options.check()?;
        Ok(options)
    }
}

/// A uniform-sampling integration of a reference integrand, as stored in YAML.
///
/// ```yaml
/// name: product-6d
/// integrand:
///   kind: product
/// domain:
///   lower: [0, 0, 0, 0, 0, 0]
///   upper: [1, 1, 1, 1, 1, 1]
/// npoints: 50000
/// seed: 42
/// workers: 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct QuadJob {
    /// Job name used in reports.
    #[serde(default)]
    pub name: String,

    /// Integrand family.
    pub integrand: ReferenceIntegrand,

    /// Integration domain.
    pub domain: Domain,

    /// Number of integrand evaluations.
    #[validate(range(min = 2))]
    #[serde(default = "default_npoints")]
    pub npoints: usize,

    /// Master seed; omitted means a fresh seed each run.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Worker threads.
    #[validate(range(min = 1))]
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Points per batch.
    #[validate(range(min = 1))]
    #[serde(default)]
    pub batch_size: Option<usize>,
}

impl QuadJob {
    /// Load a job from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails (including malformed domains)
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> QuadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a job from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> QuadResult<Self> {
        let job: Self = serde_yaml::from_str(yaml)?;
        job.validate()?;
        job.validate_semantic()?;
        Ok(job)
    }

    /// Serialize the job back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> QuadResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn validate_semantic(&self) -> QuadResult<()> {
        self.integrand.validate()?;
        self.options().check()
    }

    /// Name for reports, falling back to the integrand family.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.integrand.name()
        } else {
            &self.name
        }
    }

    /// Integration options described by this job.
    #[must_use]
    pub fn options(&self) -> QuadOptions {
        QuadOptions {
            npoints: self.npoints,
            seed: self.seed,
            workers: self.workers,
            batch_size: self.batch_size,
            weight: 1.0,
        }
    }

    /// Closed-form value and standard error for this job.
    ///
    /// # Errors
    ///
    /// Returns error if the integrand parameters are invalid.
    pub fn expected(&self) -> QuadResult<Expected> {
        self.integrand.expected(&self.domain, self.npoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults() {
        let options = QuadOptions::default();

        assert_eq!(options.npoints, 10_000);
        assert_eq!(options.seed, None);
        assert_eq!(options.workers, 1);
        assert_eq!(options.batch_size, None);
        assert!((options.weight - 1.0).abs() < f64::EPSILON);
        assert_eq!(options.effective_batch_size(), DEFAULT_BATCH_SIZE);
    }

    #[test]
    fn test_options_builder() {
        let options = QuadOptions::builder()
            .npoints(5000)
            .seed(12345)
            .workers(4)
            .batch_size(500)
            .weight(2.5)
            .build()
            .unwrap();

        assert_eq!(options.npoints, 5000);
        assert_eq!(options.seed, Some(12345));
        assert_eq!(options.workers, 4);
        assert_eq!(options.effective_batch_size(), 500);
        assert!((options.weight - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_builder_rejects_bad_options() {
        assert!(matches!(
            QuadOptions::builder().npoints(0).build(),
            Err(QuadError::TooFewPoints { npoints: 0 })
        ));
        assert!(matches!(
            QuadOptions::builder().workers(0).build(),
            Err(QuadError::NoWorkers)
        ));
        assert!(matches!(
            QuadOptions::builder().batch_size(0).build(),
            Err(QuadError::InvalidBatchSize)
        ));
        assert!(matches!(
            QuadOptions::builder().weight(f64::NAN).build(),
            Err(QuadError::InvalidWeight)
        ));
    }

    #[test]
    fn test_job_yaml_parse() {
        let yaml = r"
name: gaussian-2d
integrand:
  kind: gaussian
  beta: 1.0
domain:
  lower: [-1.0, -1.0]
  upper: [2.0, 2.0]
npoints: 20000
seed: 7
workers: 2
batch_size: 4000
";
        let job = QuadJob::from_yaml(yaml).unwrap();

        assert_eq!(job.display_name(), "gaussian-2d");
        assert_eq!(job.integrand, ReferenceIntegrand::Gaussian { beta: 1.0 });
        assert_eq!(job.domain.dim(), 2);

        let options = job.options();
        assert_eq!(options.npoints, 20_000);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.workers, 2);
        assert_eq!(options.batch_size, Some(4000));
    }

    #[test]
    fn test_job_defaults() {
        let yaml = r"
integrand:
  kind: product
domain:
  lower: [0.0]
  upper: [1.0]
";
        let job = QuadJob::from_yaml(yaml).unwrap();
        assert_eq!(job.display_name(), "product");
        assert_eq!(job.npoints, 10_000);
        assert_eq!(job.workers, 1);
        assert_eq!(job.seed, None);
    }

    #[test]
    fn test_job_rejects_too_few_points() {
        let yaml = r"
integrand:
  kind: product
domain:
  lower: [0.0]
  upper: [1.0]
npoints: 1
";
        assert!(matches!(
            QuadJob::from_yaml(yaml),
            Err(QuadError::Validation(_))
        ));
    }

    #[test]
    fn test_job_rejects_mismatched_domain() {
        let yaml = r"
integrand:
  kind: product
domain:
  lower: [0.0, 0.0]
  upper: [1.0]
";
        let err = QuadJob::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, QuadError::YamlParse(_)));
        assert!(err.to_string().contains("2 dimensions"));
    }

    #[test]
    fn test_job_rejects_bad_beta() {
        let yaml = r"
integrand:
  kind: gaussian
  beta: -2.0
domain:
  lower: [0.0]
  upper: [1.0]
";
        assert!(matches!(
            QuadJob::from_yaml(yaml),
            Err(QuadError::InvalidParameter { name: "beta", .. })
        ));
    }

    #[test]
    fn test_job_rejects_unknown_fields() {
        let yaml = r"
integrand:
  kind: product
domain:
  lower: [0.0]
  upper: [1.0]
samples: 100
";
        assert!(QuadJob::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_job_expected() {
        let yaml = r"
integrand:
  kind: product
domain:
  lower: [0.0, 0.0]
  upper: [1.0, 1.0]
npoints: 2000
";
        let job = QuadJob::from_yaml(yaml).unwrap();
        let expected = job.expected().unwrap();

        assert!((expected.value - 0.25).abs() < 1e-12);
        let variance = 1.0 / 9.0 - 1.0 / 16.0;
        assert!((expected.error - (variance / 2000.0_f64).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_job_yaml_round_trip() {
        let yaml = r"
name: const
integrand:
  kind: constant
  value: 2.0
domain:
  lower: [-1.0]
  upper: [2.0]
npoints: 100
seed: 3
";
        let job = QuadJob::from_yaml(yaml).unwrap();
        let back = QuadJob::from_yaml(&job.to_yaml().unwrap()).unwrap();
        assert_eq!(job, back);
    }

    #[test]
    fn test_job_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.yaml");
        std::fs::write(
            &path,
            "integrand:\n  kind: constant\ndomain:\n  lower: [0.0]\n  upper: [3.0]\n",
        )
        .unwrap();

        let job = QuadJob::load(&path).unwrap();
        assert_eq!(job.integrand, ReferenceIntegrand::Constant { value: 1.0 });
    }

    #[test]
    fn test_job_load_missing_file() {
        assert!(matches!(
            QuadJob::load("/nonexistent/job.yaml"),
            Err(QuadError::Io(_))
        ));
    }
}
