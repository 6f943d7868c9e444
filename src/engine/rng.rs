//! Deterministic random number generation.
//!
//! Implements PCG (Permuted Congruential Generator) with partitioned seeds
//! for reproducible parallel integration.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, every batch draws a bitwise-identical
//! sequence across:
//! - Different runs
//! - Different platforms
//! - Different worker counts (batch `i` always uses stream `i`)

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Multiplier spreading stream indices across the seed space.
const STREAM_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic, reproducible random number generator.
#[derive(Debug, Clone)]
pub struct QuadRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl QuadRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from operating-system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// RNG for stream `index`, independent of any partitions drawn so far.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mcquad::engine::rng::QuadRng;
    ///
    /// let rng = QuadRng::new(42);
    /// let mut a = rng.stream_at(3);
    /// let mut b = QuadRng::new(42).stream_at(3);
    /// assert_eq!(a.gen_f64(), b.gen_f64());
    /// ```
    #[must_use]
    pub fn stream_at(&self, index: u64) -> Self {
        let seed = self
            .master_seed
            .wrapping_add(index.wrapping_mul(STREAM_SPREAD));
        Self {
            master_seed: self.master_seed,
            stream: index,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create partitioned RNGs for parallel execution.
    ///
    /// Each partition gets an independent stream derived from the master seed,
    /// ensuring reproducibility regardless of execution order.
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| self.stream_at(self.stream + i as u64))
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random f64 between `min` and `max`.
    ///
    /// Reversed bounds are allowed and sample the same interval.
    pub fn gen_range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.gen_f64()
    }

    /// Generate n random f64 samples in [0, 1).
    #[must_use]
    pub fn sample_n(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.gen_f64()).collect()
    }

    /// Generate a standard normal sample using Box-Muller transform.
    pub fn gen_standard_normal(&mut self) -> f64 {
        let u1 = self.gen_f64();
        let u2 = self.gen_f64();

        // Avoid log(0)
        let u1 = if u1 < f64::EPSILON { f64::EPSILON } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    /// Generate a normal sample with given mean and std.
    pub fn gen_normal(&mut self, mean: f64, std: f64) -> f64 {
        mean + std * self.gen_standard_normal()
    }

    /// Generate an exponential sample with the given scale (mean).
    ///
    /// Inverse CDF: `-scale * ln(1 - U)`. `1 - U` lies in (0, 1], so the
    /// logarithm is always finite.
    pub fn gen_exponential(&mut self, scale: f64) -> f64 {
        -scale * (1.0 - self.gen_f64()).ln()
    }
}
