use crate::matrix::Matrix;
use crate::partition::Region;

/// i-k-j multiplication restricted to one output region.
///
/// By swapping the j and k loops, the innermost loop walks a row of B and
/// the output segment sequentially (stride 1). Each `segments[r]` is output
/// row `region.row_start + r` limited to `region.cols()`; the segments are
/// zeroed first and then accumulated into.
pub fn matmul_ikj_region(a: &Matrix, b: &Matrix, region: Region, segments: &mut [&mut [i32]]) {
    debug_assert_eq!(segments.len(), region.height());

    for (segment, i) in segments.iter_mut().zip(region.rows()) {
        matmul_ikj_row(a, b, i, region.col_start, segment);
    }
}

/// Computes `out = A[i, ..] * B[.., col_start..col_start + out.len()]`.
pub fn matmul_ikj_row(a: &Matrix, b: &Matrix, i: usize, col_start: usize, out: &mut [i32]) {
    let col_end = col_start + out.len();
    out.fill(0);

    for (p, &a_ip) in a.row_slice(i).iter().enumerate() {
        let b_row = &b.row_slice(p)[col_start..col_end];
        for (c, &b_pj) in out.iter_mut().zip(b_row) {
            *c = c.wrapping_add(a_ip.wrapping_mul(b_pj));
        }
    }
}
