//! Integration engine.
//!
//! - Deterministic RNG (PCG with partitioned streams)
//! - Work-stealing batch scheduler with deterministic merge order
//! - Running moments and the final estimate

pub mod estimate;
pub mod rng;
pub mod scheduler;

pub use estimate::{Accumulator, Estimate};
pub use rng::QuadRng;
pub use scheduler::{Batch, BatchScheduler, DEFAULT_BATCH_SIZE};
