//! Integer matrix multiplication with interchangeable execution strategies.
//!
//! Every strategy computes the same product. They only differ in how the
//! result grid is split into work units and how those units are scheduled:
//!
//! - `Whole`: one unit on the calling thread (the baseline)
//! - `RowWise`: one unit per output row on a fixed pool of OS threads
//! - `BlockWise(n)`: `n × n` tiles on a fixed pool of OS threads
//! - `DataParallel`: one unit per row on a work-stealing rayon pool
//!
//! Arithmetic wraps like fixed-width `i32`, and the units of a call never
//! overlap, so every strategy returns a bit-identical matrix.
//!
//! ## Usage
//!
//! ```
//! use matmul_engine::{Matrix, Strategy, multiply};
//!
//! let a = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
//! let b = Matrix::from_rows(&[[7, 8], [9, 10], [11, 12]]).unwrap();
//!
//! let c = multiply(&a, &b, Strategy::BlockWise(16), 4).unwrap();
//! assert_eq!(c, Matrix::from_rows(&[[58, 64], [139, 154]]).unwrap());
//! ```
//!
//! Each call owns its worker pool and joins every thread before returning,
//! whether it succeeds, times out, is cancelled or a unit panics.

pub mod benchmark;
pub mod error;
pub mod kernels;
pub mod matrix;
pub mod partition;
pub mod threaded;
pub mod tuning;

pub use error::{Error, Result};
pub use matrix::{Matrix, Shape};
pub use partition::{Strategy, WorkUnit};
pub use threaded::{CancelToken, ExecOptions, multiply_with};
pub use tuning::{default_block_size, default_worker_count};

/// Matrix multiply: C = A * B
///
/// Uses `strategy` on at most `workers` threads with default
/// [`ExecOptions`].
///
/// # Errors
///
/// - [`Error::IncompatibleShape`] if `a.columns() != b.rows()`
/// - [`Error::InvalidParameter`] if `workers` or the block size is zero
/// - [`Error::Timeout`], [`Error::Interrupted`] or [`Error::TaskFailed`]
///   if the pool does not complete every unit
pub fn multiply(a: &Matrix, b: &Matrix, strategy: Strategy, workers: usize) -> Result<Matrix> {
    multiply_with(a, b, strategy, workers, &ExecOptions::default())
}

/// Single-threaded baseline.
pub fn multiply_sequential(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply(a, b, Strategy::Whole, 1)
}

/// One task per output row on a pool of `workers` threads.
///
/// The pool never has more threads than the result has rows.
pub fn multiply_rows(a: &Matrix, b: &Matrix, workers: usize) -> Result<Matrix> {
    multiply(a, b, Strategy::RowWise, workers)
}

/// Row tasks on a work-stealing pool sized to the machine.
pub fn multiply_data_parallel(a: &Matrix, b: &Matrix) -> Result<Matrix> {
    multiply(a, b, Strategy::DataParallel, default_worker_count())
}

/// `block_size × block_size` tiles on a pool of `workers` threads.
pub fn multiply_blocks(
    a: &Matrix,
    b: &Matrix,
    block_size: usize,
    workers: usize,
) -> Result<Matrix> {
    multiply(a, b, Strategy::BlockWise(block_size), workers)
}
