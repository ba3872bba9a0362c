//! Scalar kernels that fill the result cells of one work unit.
//!
//! All arithmetic is `wrapping_mul` / `wrapping_add` on `i32`, so overflow
//! wraps exactly like fixed-width two's-complement integers. Wrapping
//! addition is associative and commutative, which is why the two loop
//! orders below produce bit-identical results.
//!
//! - `naive_ijk`: textbook dot product per cell, used for the whole-matrix
//!   baseline
//! - `naive_ikj`: row-streaming order over a sub-region, used by every
//!   parallel strategy

pub mod naive_ijk;
pub mod naive_ikj;
