//! Error types for matrix construction and multiplication.

use std::time::Duration;

use thiserror::Error;

use crate::matrix::Shape;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid matrix shape: {0}")]
    InvalidShape(String),

    #[error(
        "cannot multiply {left} by {right}: columns of the first matrix ({}) must equal rows of the second ({})",
        .left.cols,
        .right.rows
    )]
    IncompatibleShape { left: Shape, right: Shape },

    #[error("index ({row}, {col}) is out of range for a {shape} matrix")]
    OutOfRange { row: usize, col: usize, shape: Shape },

    #[error("{name} must be positive, got {value}")]
    InvalidParameter { name: &'static str, value: usize },

    #[error("workers did not drain within {timeout:?} ({completed}/{total} units completed)")]
    Timeout {
        timeout: Duration,
        completed: usize,
        total: usize,
    },

    #[error("multiplication was cancelled by the caller")]
    Interrupted,

    #[error("{failed} of {total} work units failed: {message}")]
    TaskFailed {
        failed: usize,
        total: usize,
        message: String,
    },

    #[error("failed to start worker pool: {0}")]
    PoolStart(String),

    #[error("strategy '{label}' produced a different result than the sequential baseline")]
    StrategyMismatch { label: String },
}
