use crate::matrix::Matrix;

/// Naive matrix multiplication using i-j-k loop order.
///
/// This is the textbook triple loop: every cell is one dot product of a row
/// of A with a column of B. The column walk over B has stride `n`, so this
/// is the slow path, kept as the sequential baseline every other strategy
/// is checked against.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k)
/// * `b` - Matrix B (k × n)
/// * `c` - Result C (m × n), row-major, overwritten (C = A * B)
pub fn matmul_naive_ijk(a: &Matrix, b: &Matrix, c: &mut [i32]) {
    let (m, k, n) = (a.rows(), a.columns(), b.columns());
    let (a, b) = (a.as_slice(), b.as_slice());
    debug_assert_eq!(c.len(), m * n);

    for i in 0..m {
        for j in 0..n {
            let mut sum = 0i32;
            for p in 0..k {
                sum = sum.wrapping_add(a[i * k + p].wrapping_mul(b[p * n + j]));
            }
            c[i * n + j] = sum;
        }
    }
}
