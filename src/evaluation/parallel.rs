use std::num::NonZeroUsize;
use std::ops::Range;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{ParallelError, Result};

/// Number of workers to use when none is requested: the available cores.
#[must_use]
pub fn available_workers() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// Splits `[0, total)` into `workers` contiguous chunks.
///
/// Chunk `i` covers `[i * (total / workers), (i + 1) * (total / workers))`,
/// except the last, which extends to `total`. Leading chunks are empty when
/// `total < workers`. Returns no chunks for zero workers.
#[must_use]
pub fn chunk_ranges(total: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let size = total / workers;
    (0..workers)
        .map(|i| {
            let start = i * size;
            let end = if i + 1 == workers {
                total
            } else {
                start + size
            };
            start..end
        })
        .collect()
}

/// A fixed-size pool of worker threads for one or more evaluation passes.
///
/// Threads are started by [`WorkerPool::new`] and shut down when the pool is
/// dropped.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Starts a pool with `workers` threads.
    ///
    /// # Errors
    ///
    /// Returns an error if `workers` is zero or the threads cannot be spawned.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ParallelError::NoWorkers.into());
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("polygrav-worker-{i}"))
            .build()
            .map_err(ParallelError::from)?;
        Ok(Self { pool, workers })
    }

    /// Starts a pool with one thread per available core.
    ///
    /// # Errors
    ///
    /// Returns an error if the threads cannot be spawned.
    pub fn with_available_parallelism() -> Result<Self> {
        Self::new(available_workers())
    }

    /// Number of worker threads.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluates `[0, total)` chunk by chunk on the pool and concatenates the
    /// results in index order.
    ///
    /// `evaluate_chunk(start, stop)` must return the results for indices
    /// `start..stop`, in order. Blocks until every chunk has finished.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by any chunk; results of the other
    /// chunks are discarded.
    pub fn scatter_gather<T, F>(&self, total: usize, evaluate_chunk: F) -> Result<Vec<T>>
    where
        T: Send,
        F: Fn(usize, usize) -> Result<Vec<T>> + Sync,
    {
        let ranges = chunk_ranges(total, self.workers);

        let chunks: Vec<Vec<T>> = self.pool.install(|| {
            ranges
                .into_par_iter()
                .map(|range| {
                    debug!(start = range.start, stop = range.end, "evaluating chunk");
                    evaluate_chunk(range.start, range.end)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let mut merged = Vec::with_capacity(total);
        for chunk in chunks {
            merged.extend(chunk);
        }
        Ok(merged)
    }
}
