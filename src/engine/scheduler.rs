//! Work-stealing batch scheduler.
//!
//! Splits an integration into fixed-size batches and spreads them over worker
//! threads. Idle workers steal batches from busy ones, so a slow integrand in
//! one corner of the domain does not leave the other threads waiting.
//!
//! Batch results are always returned in batch order, which keeps merged sums
//! bitwise-identical whatever the worker count.

use std::sync::{Mutex, PoisonError};

use crossbeam_deque::{Injector, Steal, Stealer, Worker};
use tracing::debug;

/// Points per batch when the caller does not choose one.
pub const DEFAULT_BATCH_SIZE: usize = 10_000;

/// A contiguous block of sample points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Batch {
    /// Batch index; also selects the RNG stream.
    pub index: usize,
    /// Number of points in this batch.
    pub len: usize,
}

/// Split `npoints` into batches of `batch_size`; the last batch takes the
/// remainder.
#[must_use]
pub fn plan_batches(npoints: usize, batch_size: usize) -> Vec<Batch> {
    if batch_size == 0 {
        return Vec::new();
    }
    let full = npoints / batch_size;
    let rest = npoints % batch_size;

    let mut batches: Vec<Batch> = (0..full)
        .map(|index| Batch {
            index,
            len: batch_size,
        })
        .collect();
    if rest > 0 {
        batches.push(Batch {
            index: full,
            len: rest,
        });
    }
    batches
}

/// Work-stealing executor for integration batches.
#[derive(Debug)]
pub struct BatchScheduler {
    /// Number of worker threads.
    num_workers: usize,
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl BatchScheduler {
    /// Create with default number of workers (number of CPUs).
    #[must_use]
    pub fn new() -> Self {
        Self {
            num_workers: std::thread::available_parallelism()
                .map(std::num::NonZero::get)
                .unwrap_or(4),
        }
    }

    /// Create with specified number of workers.
    #[must_use]
    pub const fn with_workers(num_workers: usize) -> Self {
        Self { num_workers }
    }

    /// Get number of workers.
    #[must_use]
    pub const fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run every batch and return the results in batch order.
    ///
    /// With a single worker (or a single batch) everything runs on the
    /// calling thread.
    pub fn execute<F, R>(&self, batches: Vec<Batch>, run: F) -> Vec<R>
    where
        F: Fn(Batch) -> R + Sync,
        R: Send,
    {
        let n_batches = batches.len();
        let num_workers = self.num_workers.clamp(1, n_batches.max(1));

        if num_workers == 1 {
            debug!(batches = n_batches, "running batches inline");
            return batches.into_iter().map(run).collect();
        }

        debug!(
            batches = n_batches,
            workers = num_workers,
            "dispatching batches"
        );

        let injector: Injector<Batch> = Injector::new();
        for batch in batches {
            injector.push(batch);
        }

        let workers: Vec<Worker<Batch>> = (0..num_workers).map(|_| Worker::new_fifo()).collect();
        let stealers: Vec<Stealer<Batch>> = workers.iter().map(Worker::stealer).collect();

        let results: Mutex<Vec<(usize, R)>> = Mutex::new(Vec::with_capacity(n_batches));

        std::thread::scope(|s| {
            for (worker_id, worker) in workers.into_iter().enumerate() {
                let injector = &injector;
                let stealers = &stealers;
                let results = &results;
                let run = &run;

                s.spawn(move || {
                    while let Some(batch) = next_batch(worker_id, &worker, injector, stealers) {
                        let index = batch.index;
                        let result = run(batch);
                        record(results, index, result);
                    }
                });
            }
        });

        into_ordered(results)
    }
}

/// Store one batch result, recovering a poisoned lock.
fn record<R>(results: &Mutex<Vec<(usize, R)>>, index: usize, result: R) {
    results
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push((index, result));
}

/// Results sorted by batch index.
fn into_ordered<R>(results: Mutex<Vec<(usize, R)>>) -> Vec<R> {
    let mut indexed = results.into_inner().unwrap_or_else(PoisonError::into_inner);
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, r)| r).collect()
}

/// Local queue first, then the global queue, then round-robin theft.
fn next_batch(
    worker_id: usize,
    worker: &Worker<Batch>,
    injector: &Injector<Batch>,
    stealers: &[Stealer<Batch>],
) -> Option<Batch> {
    if let Some(batch) = worker.pop() {
        return Some(batch);
    }

    loop {
        match injector.steal_batch_and_pop(worker) {
            Steal::Success(batch) => return Some(batch),
            Steal::Empty => break,
            Steal::Retry => {}
        }
    }

    for i in 0..stealers.len() {
        let victim = (worker_id + i + 1) % stealers.len();
        loop {
            match stealers[victim].steal() {
                Steal::Success(batch) => return Some(batch),
                Steal::Empty => break,
                Steal::Retry => {}
            }
        }
    }
    None
}
