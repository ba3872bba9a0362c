//! The immutable integer matrix consumed and produced by the engine.
//!
//! Storage is a single row-major `Vec<i32>` owned by the matrix. There are
//! no public mutators: a result is only wrapped into a `Matrix` after every
//! cell has been written.

use std::fmt;

use crate::error::{Error, Result};

pub mod generate;
pub mod transpose;

/// Rows × columns of a matrix or of a result grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of cells in the grid. Only meaningful for shapes that passed
    /// construction; use [`Shape::checked_len`] for anything else.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of cells, or `None` if it does not fit in `usize`.
    pub fn checked_len(&self) -> Option<usize> {
        self.rows.checked_mul(self.cols)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Dense, rectangular, immutable matrix of `i32`.
///
/// Equality and hashing are structural and shape-sensitive: a 2×3 and a
/// 3×2 matrix holding the same six values are different matrices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// Builds a matrix from row data, copying it.
    ///
    /// Fails with [`Error::InvalidShape`] if there are no rows, the rows are
    /// empty, or any row has a different length from the first.
    ///
    /// ```
    /// use matmul_engine::Matrix;
    ///
    /// let m = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(m.rows(), 2);
    /// assert_eq!(m.get(1, 2).unwrap(), 6);
    /// ```
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self> {
        let first = rows
            .first()
            .ok_or_else(|| Error::InvalidShape("matrix cannot be empty".to_string()))?;
        let cols = first.as_ref().len();
        if cols == 0 {
            return Err(Error::InvalidShape("matrix rows cannot be empty".to_string()));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(Error::InvalidShape(format!(
                    "matrix must be rectangular: row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend_from_slice(row);
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            data,
        })
    }

    /// A `rows × cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![0; len],
        })
    }

    /// Wraps a row-major buffer of exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<i32>) -> Result<Self> {
        let len = check_dimensions(rows, cols)?;
        if data.len() != len {
            return Err(Error::InvalidShape(format!(
                "data length {} does not match matrix dimensions {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Wraps an already validated, fully populated buffer.
    pub(crate) fn from_parts(shape: Shape, data: Vec<i32>) -> Self {
        debug_assert_eq!(shape.len(), data.len());
        Self {
            rows: shape.rows,
            cols: shape.cols,
            data,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> Shape {
        Shape::new(self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// True iff `self * other` is defined.
    pub fn can_multiply_with(&self, other: &Matrix) -> bool {
        self.cols == other.rows
    }

    pub fn get(&self, row: usize, col: usize) -> Result<i32> {
        if row >= self.rows || col >= self.cols {
            return Err(Error::OutOfRange {
                row,
                col,
                shape: self.shape(),
            });
        }
        Ok(self.data[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Result<&[i32]> {
        if row >= self.rows {
            return Err(Error::OutOfRange {
                row,
                col: 0,
                shape: self.shape(),
            });
        }
        Ok(self.row_slice(row))
    }

    /// Copies column `col` out of the row-major storage.
    pub fn column(&self, col: usize) -> Result<Vec<i32>> {
        if col >= self.cols {
            return Err(Error::OutOfRange {
                row: 0,
                col,
                shape: self.shape(),
            });
        }
        Ok(self.data.iter().skip(col).step_by(self.cols).copied().collect())
    }

    /// Row-major view of every element.
    pub fn as_slice(&self) -> &[i32] {
        &self.data
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = vec![0; self.data.len()];
        transpose::transpose(&self.data, &mut data, self.rows, self.cols);
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Row `row` without a bounds check on the row index beyond slicing.
    pub(crate) fn row_slice(&self, row: usize) -> &[i32] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }
}

impl TryFrom<Vec<Vec<i32>>> for Matrix {
    type Error = Error;

    fn try_from(rows: Vec<Vec<i32>>) -> Result<Self> {
        Matrix::from_rows(&rows)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix {}x{}:", self.rows, self.cols)?;

        let width = self
            .data
            .iter()
            .map(|v| v.to_string().len())
            .max()
            .unwrap_or(1);

        for row in self.data.chunks(self.cols) {
            write!(f, "│ ")?;
            for (j, value) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", value, width = width)?;
            }
            writeln!(f, " │")?;
        }
        Ok(())
    }
}

/// Validates a `rows × cols` grid and returns its cell count.
pub(crate) fn check_dimensions(rows: usize, cols: usize) -> Result<usize> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidShape(format!(
            "matrix dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }
    Shape::new(rows, cols).checked_len().ok_or_else(|| {
        Error::InvalidShape(format!("matrix dimensions {}x{} overflow usize", rows, cols))
    })
}
