use rayon::prelude::*;
use thiserror::Error;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),

    /// The row stride passed to [`execute_rows`] is zero.
    ///
    /// Operators never hit this since images have a positive width. It guards direct
    /// callers of [`execute_rows`] only.
    #[error("row stride must be > 0")]
    InvalidRowStride,
}

/// Controls how the per-row work of an operator is executed.
///
/// Rows of the output are independent within a single pass of every operator, so they
/// can be written concurrently while the input is shared read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Use the global Rayon thread pool to process rows in parallel.
    #[default]
    ParallelRows,

    /// Run sequentially on the current thread.
    ///
    /// Useful for small images, debugging, or when the overhead of parallelization
    /// outweighs the benefits.
    Serial,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call, which has significant overhead.
    /// Use this primarily for benchmarking or specific isolation needs.
    Fixed(usize),
}

/// An [`ExecutionStrategy`] resolved once, so that repeated row passes share one pool.
pub(crate) enum RowExecutor {
    Serial,
    Global,
    Pool(rayon::ThreadPool),
}

impl RowExecutor {
    /// Resolve `strategy`, building the local pool of [`ExecutionStrategy::Fixed`].
    pub(crate) fn new(strategy: ExecutionStrategy) -> Result<Self, ParallelError> {
        Ok(match strategy {
            ExecutionStrategy::Serial => RowExecutor::Serial,
            ExecutionStrategy::ParallelRows => RowExecutor::Global,
            ExecutionStrategy::Fixed(n) => RowExecutor::Pool(build_pool(n)?),
        })
    }

    /// Call `op(row_index, row)` for each row of `width` elements. A zero width is a no-op.
    pub(crate) fn run<T, F>(&self, dst: &mut [T], width: usize, op: F)
    where
        T: Send,
        F: Fn(usize, &mut [T]) + Send + Sync,
    {
        if width == 0 {
            return;
        }

        match self {
            RowExecutor::Serial => {
                dst.chunks_mut(width)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            RowExecutor::Global => {
                dst.par_chunks_mut(width)
                    .enumerate()
                    .for_each(|(row, chunk)| op(row, chunk));
            }
            RowExecutor::Pool(pool) => {
                pool.install(|| {
                    dst.par_chunks_mut(width)
                        .enumerate()
                        .for_each(|(row, chunk)| op(row, chunk));
                });
            }
        }
    }
}

/// Fill `dst` row by row, calling `op(row_index, row)` for each row of `width` pixels.
///
/// # Arguments
///
/// * `strategy` - The execution strategy.
/// * `dst` - The destination buffer in row-major order.
/// * `width` - The number of elements per row.
/// * `op` - The operation writing a single row.
pub fn execute_rows<T, F>(
    strategy: ExecutionStrategy,
    dst: &mut [T],
    width: usize,
    op: F,
) -> Result<(), ParallelError>
where
    T: Send,
    F: Fn(usize, &mut [T]) + Send + Sync,
{
    if width == 0 {
        return Err(ParallelError::InvalidRowStride);
    }

    RowExecutor::new(strategy)?.run(dst, width, op);
    Ok(())
}

fn build_pool(n: usize) -> Result<rayon::ThreadPool, ParallelError> {
    if n == 0 {
        return Err(ParallelError::InvalidThreadCount(n));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .build()
        .map_err(|e| ParallelError::BuildError(e.to_string()))
}
