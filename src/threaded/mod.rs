//! Multi-threaded execution of a multiplication plan.
//!
//! Every call builds its own pool and tears it down before returning:
//! - `pool`: fixed-size scoped OS threads pulling units from a shared queue
//!   (row-wise and block-wise strategies)
//! - `data_parallel`: a scoped rayon pool with work stealing over rows
//!
//! In both cases the result buffer is split into disjoint tiles before any
//! worker starts, so no cell is ever reachable from two workers.

pub mod data_parallel;
pub mod pool;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::kernels::naive_ijk::matmul_naive_ijk;
use crate::kernels::naive_ikj::matmul_ikj_region;
use crate::matrix::{Matrix, Shape};
use crate::partition::{self, Strategy};
use crate::tuning::recommended_max_workers;

/// Bounded wait applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared flag a caller flips to abandon a running multiplication.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-call execution settings.
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// How long the caller waits for the pool to drain.
    pub timeout: Duration,
    pub cancel: Option<CancelToken>,
}

impl Default for ExecOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            cancel: None,
        }
    }
}

impl ExecOptions {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}

/// Computes `a * b` with `strategy` on at most `workers` threads.
///
/// All preconditions are checked before the result buffer is allocated.
pub fn multiply_with(
    a: &Matrix,
    b: &Matrix,
    strategy: Strategy,
    workers: usize,
    options: &ExecOptions,
) -> Result<Matrix> {
    if !a.can_multiply_with(b) {
        return Err(Error::IncompatibleShape {
            left: a.shape(),
            right: b.shape(),
        });
    }

    let shape = Shape::new(a.rows(), b.columns());
    let len = shape.checked_len().ok_or_else(|| {
        Error::InvalidShape(format!("result dimensions {} overflow usize", shape))
    })?;
    let plan = partition::plan(shape, strategy, workers)?;
    if options.is_cancelled() {
        return Err(Error::Interrupted);
    }

    if workers > recommended_max_workers() {
        warn!(
            requested = workers,
            recommended = recommended_max_workers(),
            "worker count is higher than recommended"
        );
    }
    debug!(
        %strategy,
        %shape,
        units = plan.units.len(),
        workers = plan.workers,
        "dispatching multiplication"
    );

    let mut data = vec![0; len];

    match strategy {
        Strategy::Whole => matmul_naive_ijk(a, b, &mut data),
        Strategy::DataParallel => {
            data_parallel::multiply_rows(a, b, &mut data, shape, plan.workers, options)?
        }
        Strategy::RowWise | Strategy::BlockWise(_) => {
            let tiles = partition::split_tiles(&mut data, shape, &plan.units);
            pool::run(tiles, plan.workers, options, |mut tile| {
                matmul_ikj_region(a, b, tile.region, &mut tile.segments)
            })?;
        }
    }

    Ok(Matrix::from_parts(shape, data))
}
