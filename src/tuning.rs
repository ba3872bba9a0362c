//! Advisory defaults for worker count and block size.

use std::num::NonZeroUsize;
use std::thread;

/// Parallel execution units available to this process (at least 1).
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Above this many workers the engine logs a warning.
pub fn recommended_max_workers() -> usize {
    default_worker_count() * 2
}

/// Block edge length for an `n × n` problem.
///
/// Step function: 16 up to 100, 32 up to 500, 64 up to 1000, else 128.
pub fn default_block_size(n: usize) -> usize {
    match n {
        0..=100 => 16,
        101..=500 => 32,
        501..=1000 => 64,
        _ => 128,
    }
}

/// Defaults a benchmark harness needs for one matrix size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    pub workers: usize,
    pub block_size: usize,
}

impl Tuning {
    pub fn for_size(n: usize) -> Self {
        Self {
            workers: default_worker_count(),
            block_size: default_block_size(n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_size_steps() {
        assert_eq!(default_block_size(1), 16);
        assert_eq!(default_block_size(100), 16);
        assert_eq!(default_block_size(101), 32);
        assert_eq!(default_block_size(500), 32);
        assert_eq!(default_block_size(501), 64);
        assert_eq!(default_block_size(1000), 64);
        assert_eq!(default_block_size(1001), 128);
        assert_eq!(default_block_size(100_000), 128);
    }

    #[test]
    fn test_block_size_is_monotonic() {
        let sizes: Vec<usize> = (1..2000).map(default_block_size).collect();
        assert!(sizes.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_worker_defaults() {
        assert!(default_worker_count() >= 1);
        assert_eq!(recommended_max_workers(), default_worker_count() * 2);
        assert_eq!(Tuning::for_size(300).block_size, 32);
    }
}
