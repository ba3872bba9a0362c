//! Row-parallel multiplication on a work-stealing rayon pool.
//!
//! Partitioning is identical to the row-wise strategy; only the scheduling
//! differs. The pool is built with `build_scoped`, so its threads live
//! inside a `std::thread::scope` and are joined before returning.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use super::ExecOptions;
use crate::error::{Error, Result};
use crate::kernels::naive_ikj::matmul_ikj_row;
use crate::matrix::{Matrix, Shape};

/// Prefix of every data-parallel worker thread name.
pub const WORKER_NAME_PREFIX: &str = "matmul-par-";

/// Fills `out` (row-major, `shape`) with `a * b`, one row per task.
///
/// Rows that have not started when the timeout elapses or the cancel token
/// fires are skipped and the corresponding error is returned.
pub fn multiply_rows(
    a: &Matrix,
    b: &Matrix,
    out: &mut [i32],
    shape: Shape,
    workers: usize,
    options: &ExecOptions,
) -> Result<()> {
    if options.is_cancelled() {
        return Err(Error::Interrupted);
    }

    let deadline = Instant::now() + options.timeout;
    let completed = AtomicUsize::new(0);

    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("{}{}", WORKER_NAME_PREFIX, i))
        .build_scoped(
            |thread| thread.run(),
            |pool| {
                debug!(workers = pool.current_num_threads(), rows = shape.rows, "rayon pool started");
                pool.install(|| {
                    out.par_chunks_mut(shape.cols)
                        .enumerate()
                        .try_for_each(|(i, row)| {
                            if options.is_cancelled() {
                                return Err(Error::Interrupted);
                            }
                            if Instant::now() >= deadline {
                                return Err(Error::Timeout {
                                    timeout: options.timeout,
                                    completed: completed.load(Ordering::Relaxed),
                                    total: shape.rows,
                                });
                            }
                            panic::catch_unwind(AssertUnwindSafe(|| {
                                matmul_ikj_row(a, b, i, 0, row)
                            }))
                            .map_err(|_| Error::TaskFailed {
                                failed: 1,
                                total: shape.rows,
                                message: format!("row {} panicked", i),
                            })?;
                            completed.fetch_add(1, Ordering::Relaxed);
                            Ok(())
                        })
                })
            },
        )
        .unwrap_or_else(|e| Err(Error::PoolStart(e.to_string())))
}
