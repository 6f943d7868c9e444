//! Monte-Carlo quadrature.
//!
//! Two estimators share one batched, work-stealing core:
//! - [`mcquad`]: uniform sampling over a hyper-rectangle, `I ≈ Ω * ⟨f⟩`
//! - [`mcimport`]: importance sampling, `I ≈ w * ⟨f⟩_g`
//!
//! # Convergence
//!
//! By the Central Limit Theorem both estimators converge at `O(N^{-1/2})`
//! regardless of dimension.

pub mod domain;
pub mod importance;
pub mod sampler;
pub mod uniform;

pub use domain::Domain;
pub use importance::mcimport;
pub use sampler::Sampler;
pub use uniform::mcquad;

use tracing::info;

use crate::config::QuadOptions;
use crate::engine::estimate::{Accumulator, Estimate};
use crate::engine::rng::QuadRng;
use crate::engine::scheduler::{plan_batches, Batch, BatchScheduler};
use crate::error::{QuadError, QuadResult};

/// Draw `options.npoints` points with `draw`, evaluate `f` on each and
/// scale the mean by `scale`.
pub(crate) fn integrate<P, F>(
    dim: usize,
    options: &QuadOptions,
    scale: f64,
    draw: P,
    f: F,
) -> QuadResult<Estimate>
where
    P: Fn(&mut QuadRng, &mut [f64]) + Sync,
    F: Fn(&[f64]) -> f64 + Sync,
{
    options.check()?;

    let master = options.seed.map_or_else(QuadRng::from_entropy, QuadRng::new);
    let batches = plan_batches(options.npoints, options.effective_batch_size());
    let scheduler = BatchScheduler::with_workers(options.workers);

    let results = scheduler.execute(batches, |batch| run_batch(batch, dim, &master, &draw, &f));

    let mut total = Accumulator::new();
    for partial in results {
        total.merge(&partial?);
    }

    let estimate = Estimate::from_accumulator(&total, scale, master.master_seed());
    info!(
        dim,
        npoints = estimate.npoints,
        seed = estimate.seed,
        value = estimate.value,
        error = estimate.error,
        "integration finished"
    );
    Ok(estimate)
}

fn run_batch<P, F>(
    batch: Batch,
    dim: usize,
    master: &QuadRng,
    draw: &P,
    f: &F,
) -> QuadResult<Accumulator>
where
    P: Fn(&mut QuadRng, &mut [f64]),
    F: Fn(&[f64]) -> f64,
{
    let mut rng = master.stream_at(batch.index as u64);
    let mut point = vec![0.0; dim];
    let mut acc = Accumulator::new();

    for sample in 0..batch.len {
        draw(&mut rng, &mut point);
        let value = f(&point);
        if !value.is_finite() {
            return Err(QuadError::NonFiniteValue {
                location: format!("batch {}, sample {sample}", batch.index),
            });
        }
        acc.push(value);
    }
    Ok(acc)
}
