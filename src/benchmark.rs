//! Timing and cross-checking of multiplication strategies.
//!
//! This is the library side of the benchmark runner: it runs cases and
//! returns plain data. All console formatting lives in `main.rs`.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::error::{Error, Result};
use crate::matrix::{Matrix, generate};
use crate::partition::Strategy;
use crate::tuning::{Tuning, default_worker_count};

/// One strategy/worker-count combination to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    pub label: String,
    pub strategy: Strategy,
    pub workers: usize,
}

impl Case {
    pub fn new(label: impl Into<String>, strategy: Strategy, workers: usize) -> Self {
        Self {
            label: label.into(),
            strategy,
            workers,
        }
    }
}

/// A result matrix and how long it took.
#[derive(Debug, Clone)]
pub struct Timed {
    pub elapsed: Duration,
    pub result: Matrix,
}

/// Outcome of one case. Failures keep their message instead of aborting
/// the sweep.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub label: String,
    pub strategy: Strategy,
    pub workers: usize,
    /// Rows of the left operand.
    pub size: usize,
    pub elapsed: Duration,
    pub outcome: std::result::Result<(), String>,
}

impl BenchmarkResult {
    pub fn is_successful(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn millis(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// The comparison set used by the runner for an `n × n` problem.
pub fn standard_cases(n: usize) -> Vec<Case> {
    let tuning = Tuning::for_size(n);
    vec![
        Case::new("Sequential", Strategy::Whole, 1),
        Case::new("Threaded (2)", Strategy::RowWise, 2),
        Case::new("Threaded (4)", Strategy::RowWise, 4),
        Case::new(
            format!("Threaded ({})", tuning.workers),
            Strategy::RowWise,
            tuning.workers,
        ),
        Case::new("Data parallel", Strategy::DataParallel, tuning.workers),
        Case::new(
            "Block threaded",
            Strategy::BlockWise(tuning.block_size),
            tuning.workers,
        ),
    ]
}

/// Runs one strategy and reports the elapsed wall time with the result.
pub fn time_strategy(a: &Matrix, b: &Matrix, strategy: Strategy, workers: usize) -> Result<Timed> {
    let start = Instant::now();
    let result = crate::multiply(a, b, strategy, workers)?;
    Ok(Timed {
        elapsed: start.elapsed(),
        result,
    })
}

pub fn run_case(a: &Matrix, b: &Matrix, case: &Case) -> BenchmarkResult {
    let start = Instant::now();
    let outcome = crate::multiply(a, b, case.strategy, case.workers)
        .map(|_| ())
        .map_err(|e| e.to_string());

    BenchmarkResult {
        label: case.label.clone(),
        strategy: case.strategy,
        workers: case.workers,
        size: a.rows(),
        elapsed: start.elapsed(),
        outcome,
    }
}

pub fn compare(a: &Matrix, b: &Matrix, cases: &[Case]) -> Vec<BenchmarkResult> {
    cases.iter().map(|case| run_case(a, b, case)).collect()
}

/// Quickest successful result, if any.
pub fn fastest(results: &[BenchmarkResult]) -> Option<&BenchmarkResult> {
    results
        .iter()
        .filter(|r| r.is_successful())
        .min_by_key(|r| r.elapsed)
}

/// Runs every case and checks it against the sequential baseline.
///
/// Returns the baseline on success, [`Error::StrategyMismatch`] naming the
/// first disagreeing case otherwise.
pub fn cross_check(a: &Matrix, b: &Matrix, cases: &[Case]) -> Result<Matrix> {
    let baseline = crate::multiply_sequential(a, b)?;
    for case in cases {
        let result = crate::multiply(a, b, case.strategy, case.workers)?;
        if result != baseline {
            return Err(Error::StrategyMismatch {
                label: case.label.clone(),
            });
        }
    }
    Ok(baseline)
}

/// Times `strategy` on fresh random square inputs of each size.
pub fn scalability<R: Rng>(
    rng: &mut R,
    strategy: Strategy,
    workers: usize,
    sizes: &[usize],
) -> Result<Vec<BenchmarkResult>> {
    let case = Case::new(strategy.to_string(), strategy, workers);
    sizes
        .iter()
        .map(|&n| {
            let a = generate::random_with(rng, n, n, 1, 100)?;
            let b = generate::random_with(rng, n, n, 1, 100)?;
            Ok(run_case(&a, &b, &case))
        })
        .collect()
}

/// Exercises the sequential, row-wise and data-parallel paths on small inputs.
pub fn warm_up(rounds: usize) -> Result<()> {
    for _ in 0..rounds {
        let a = generate::random_square(50)?;
        let b = generate::random_square(50)?;
        crate::multiply_sequential(&a, &b)?;
        crate::multiply_rows(&a, &b, 2)?;
        crate::multiply(&a, &b, Strategy::DataParallel, default_worker_count())?;
    }
    Ok(())
}
