//! Matrix generators for tests, demos and benchmarks.
//!
//! Random generators take any [`rand::Rng`], so callers that need
//! reproducible inputs pass a seeded `StdRng` (or use [`seeded`]).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Matrix, Shape, check_dimensions};
use crate::error::{Error, Result};

/// Fill patterns for [`pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// 1, 2, 3, ... in row-major order.
    Ascending,
    /// rows*cols, rows*cols - 1, ... in row-major order.
    Descending,
    /// 0, 1, 0, 1, ... alternating on `(i + j) % 2`.
    Checkerboard,
    RowIndex,
    ColumnIndex,
}

/// Uniform values in `min..max` drawn from `rng`.
pub fn random_with<R: Rng>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    min: i32,
    max: i32,
) -> Result<Matrix> {
    let len = check_dimensions(rows, cols)?;
    check_range(min, max)?;

    let data = (0..len).map(|_| rng.gen_range(min..max)).collect();
    Ok(Matrix::from_parts(Shape::new(rows, cols), data))
}

/// Uniform values in `min..max` from the thread-local generator.
pub fn random(rows: usize, cols: usize, min: i32, max: i32) -> Result<Matrix> {
    random_with(&mut rand::thread_rng(), rows, cols, min, max)
}

/// Same as [`random`] but reproducible for a given `seed`.
pub fn seeded(seed: u64, rows: usize, cols: usize, min: i32, max: i32) -> Result<Matrix> {
    random_with(&mut StdRng::seed_from_u64(seed), rows, cols, min, max)
}

/// Square matrix with values in `0..100`.
pub fn random_square(size: usize) -> Result<Matrix> {
    random(size, size, 0, 100)
}

pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
    Matrix::zeros(rows, cols)
}

pub fn ones(rows: usize, cols: usize) -> Result<Matrix> {
    filled(rows, cols, 1)
}

pub fn filled(rows: usize, cols: usize, value: i32) -> Result<Matrix> {
    let len = check_dimensions(rows, cols)?;
    Ok(Matrix::from_parts(Shape::new(rows, cols), vec![value; len]))
}

pub fn identity(size: usize) -> Result<Matrix> {
    if size == 0 {
        return Err(Error::InvalidShape("identity size must be positive".to_string()));
    }
    check_dimensions(size, size)?;
    diagonal(&vec![1; size])
}

/// Square matrix with `values` on the main diagonal and zeros elsewhere.
pub fn diagonal(values: &[i32]) -> Result<Matrix> {
    let size = values.len();
    if size == 0 {
        return Err(Error::InvalidShape(
            "diagonal values cannot be empty".to_string(),
        ));
    }

    let mut data = vec![0; check_dimensions(size, size)?];
    for (i, &v) in values.iter().enumerate() {
        data[i * size + i] = v;
    }
    Ok(Matrix::from_parts(Shape::new(size, size), data))
}

/// Each cell is non-zero with probability `density`; non-zero values are
/// drawn from `min..max` with zero excluded.
pub fn sparse_with<R: Rng>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    density: f64,
    min: i32,
    max: i32,
) -> Result<Matrix> {
    let len = check_dimensions(rows, cols)?;
    check_range(min, max)?;
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidShape(format!(
            "density must be between 0.0 and 1.0, got {}",
            density
        )));
    }
    if min == 0 && max == 1 {
        return Err(Error::InvalidShape(
            "value range 0..1 contains no non-zero values".to_string(),
        ));
    }

    let mut data = vec![0; len];
    for cell in data.iter_mut() {
        if rng.gen_bool(density) {
            *cell = loop {
                let v = rng.gen_range(min..max);
                if v != 0 {
                    break v;
                }
            };
        }
    }
    Ok(Matrix::from_parts(Shape::new(rows, cols), data))
}

pub fn sparse(rows: usize, cols: usize, density: f64, min: i32, max: i32) -> Result<Matrix> {
    sparse_with(&mut rand::thread_rng(), rows, cols, density, min, max)
}

pub fn pattern(rows: usize, cols: usize, pattern: Pattern) -> Result<Matrix> {
    let total = check_dimensions(rows, cols)?;

    let data = (0..total)
        .map(|idx| {
            let (i, j) = (idx / cols, idx % cols);
            match pattern {
                Pattern::Ascending => idx as i32 + 1,
                Pattern::Descending => (total - idx) as i32,
                Pattern::Checkerboard => ((i + j) % 2) as i32,
                Pattern::RowIndex => i as i32,
                Pattern::ColumnIndex => j as i32,
            }
        })
        .collect();
    Ok(Matrix::from_parts(Shape::new(rows, cols), data))
}

fn check_range(min: i32, max: i32) -> Result<()> {
    if min >= max {
        return Err(Error::InvalidShape(format!(
            "min value ({}) must be less than max value ({})",
            min, max
        )));
    }
    Ok(())
}
