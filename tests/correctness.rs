use matmul_engine::matrix::generate::{self, Pattern};
use matmul_engine::partition::{self, Region};
use matmul_engine::{
    Error, Matrix, Shape, Strategy, multiply, multiply_blocks, multiply_data_parallel,
    multiply_rows, multiply_sequential,
};

fn all_strategies() -> Vec<(Strategy, usize)> {
    vec![
        (Strategy::Whole, 1),
        (Strategy::RowWise, 1),
        (Strategy::RowWise, 2),
        (Strategy::RowWise, 7),
        (Strategy::BlockWise(1), 3),
        (Strategy::BlockWise(3), 4),
        (Strategy::BlockWise(16), 2),
        (Strategy::BlockWise(1000), 8),
        (Strategy::DataParallel, 1),
        (Strategy::DataParallel, 4),
    ]
}

fn assert_all_strategies_match(a: &Matrix, b: &Matrix, name: &str) {
    let expected = multiply_sequential(a, b).unwrap();
    for (strategy, workers) in all_strategies() {
        let actual = multiply(a, b, strategy, workers).unwrap();
        assert_eq!(
            expected, actual,
            "{}: {} with {} workers differs from sequential",
            name, strategy, workers
        );
    }
}

// ============================================================
// Known results
// ============================================================

#[test]
fn test_2x3_times_3x2() {
    let a = Matrix::from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    let b = Matrix::from_rows(&[[7, 8], [9, 10], [11, 12]]).unwrap();
    let expected = Matrix::from_rows(&[[58, 64], [139, 154]]).unwrap();

    for (strategy, workers) in all_strategies() {
        assert_eq!(multiply(&a, &b, strategy, workers).unwrap(), expected, "{}", strategy);
    }
    assert_eq!(multiply_rows(&a, &b, 2).unwrap(), expected);
    assert_eq!(multiply_blocks(&a, &b, 16, 2).unwrap(), expected);
    assert_eq!(multiply_data_parallel(&a, &b).unwrap(), expected);
}

#[test]
fn test_identity_is_neutral() {
    let a = generate::seeded(9, 13, 13, -100, 100).unwrap();
    let id = generate::identity(13).unwrap();

    for (strategy, workers) in all_strategies() {
        assert_eq!(multiply(&a, &id, strategy, workers).unwrap(), a);
        assert_eq!(multiply(&id, &a, strategy, workers).unwrap(), a);
    }
}

// ============================================================
// Degenerate shapes
// ============================================================

#[test]
fn test_1x1_times_1x1() {
    let a = Matrix::from_rows(&[[6]]).unwrap();
    let b = Matrix::from_rows(&[[-7]]).unwrap();
    let expected = Matrix::from_rows(&[[-42]]).unwrap();

    for (strategy, workers) in all_strategies() {
        assert_eq!(multiply(&a, &b, strategy, workers).unwrap(), expected);
    }
}

#[test]
fn test_row_times_column() {
    let n = 9;
    let a = generate::pattern(1, n, Pattern::Ascending).unwrap();
    let b = generate::pattern(n, 1, Pattern::Ascending).unwrap();
    let expected: i32 = (1..=n as i32).map(|v| v * v).sum();

    for (strategy, workers) in all_strategies() {
        let c = multiply(&a, &b, strategy, workers).unwrap();
        assert_eq!(c.shape(), Shape::new(1, 1));
        assert_eq!(c.get(0, 0).unwrap(), expected);
    }
}

#[test]
fn test_column_times_row() {
    let n = 6;
    let a = generate::pattern(n, 1, Pattern::Ascending).unwrap();
    let b = generate::pattern(1, n, Pattern::Ascending).unwrap();

    for (strategy, workers) in all_strategies() {
        let c = multiply(&a, &b, strategy, workers).unwrap();
        assert_eq!(c.shape(), Shape::new(n, n));
        for i in 0..n {
            for j in 0..n {
                assert_eq!(c.get(i, j).unwrap(), ((i + 1) * (j + 1)) as i32);
            }
        }
    }
}

// ============================================================
// Cross-strategy equivalence
// ============================================================

#[test]
fn test_odd_and_non_square_sizes() {
    let test_cases = [
        (3, 3, 3),
        (5, 7, 3),
        (7, 3, 5),
        (11, 13, 17),
        (32, 64, 48),
        (64, 32, 48),
        (100, 50, 75),
    ];

    for (seed, (m, k, n)) in test_cases.into_iter().enumerate() {
        let a = generate::seeded(seed as u64, m, k, -1000, 1000).unwrap();
        let b = generate::seeded(seed as u64 + 100, k, n, -1000, 1000).unwrap();
        assert_all_strategies_match(&a, &b, &format!("{}x{}x{}", m, k, n));
    }
}

#[test]
fn test_tile_boundaries() {
    for size in [15, 16, 17, 31, 32, 33] {
        let a = generate::pattern(size, size, Pattern::Descending).unwrap();
        let b = generate::pattern(size, size, Pattern::Checkerboard).unwrap();
        assert_all_strategies_match(&a, &b, &format!("tile_size_{}", size));
    }
}

#[test]
fn test_overflow_wraps_identically() {
    let a = generate::filled(8, 8, i32::MAX - 3).unwrap();
    let b = generate::seeded(21, 8, 8, i32::MIN, i32::MAX).unwrap();
    assert_all_strategies_match(&a, &b, "wrapping");

    let big = generate::filled(2, 2, 1 << 20).unwrap();
    let c = multiply_rows(&big, &big, 2).unwrap();
    let expected = (1i32 << 20).wrapping_mul(1 << 20).wrapping_mul(2);
    assert_eq!(c.get(0, 0).unwrap(), expected);
}

// ============================================================
// Preconditions
// ============================================================

#[test]
fn test_incompatible_shapes_rejected_everywhere() {
    let a = Matrix::zeros(2, 3).unwrap();
    let b = Matrix::zeros(2, 3).unwrap();

    for (strategy, workers) in all_strategies() {
        let err = multiply(&a, &b, strategy, workers).unwrap_err();
        assert!(matches!(err, Error::IncompatibleShape { .. }), "{}", strategy);
    }
    assert!(matches!(multiply_sequential(&a, &b), Err(Error::IncompatibleShape { .. })));
    assert!(matches!(multiply_rows(&a, &b, 2), Err(Error::IncompatibleShape { .. })));
    assert!(matches!(multiply_blocks(&a, &b, 0, 0), Err(Error::IncompatibleShape { .. })));
    assert!(matches!(multiply_data_parallel(&a, &b), Err(Error::IncompatibleShape { .. })));
}

#[test]
fn test_invalid_parameters_rejected() {
    let a = generate::ones(4, 4).unwrap();

    assert!(matches!(
        multiply_rows(&a, &a, 0),
        Err(Error::InvalidParameter { name: "worker count", .. })
    ));
    assert!(matches!(
        multiply_blocks(&a, &a, 0, 2),
        Err(Error::InvalidParameter { name: "block size", .. })
    ));
    assert!(matches!(
        multiply(&a, &a, Strategy::DataParallel, 0),
        Err(Error::InvalidParameter { .. })
    ));
}

// ============================================================
// Worker clamping
// ============================================================

#[test]
fn test_row_wise_budget_larger_than_rows() {
    let a = generate::seeded(30, 3, 40, -10, 10).unwrap();
    let b = generate::seeded(31, 40, 5, -10, 10).unwrap();

    let plan = partition::plan(Shape::new(3, 5), Strategy::RowWise, 100).unwrap();
    assert_eq!(plan.workers, 3);

    let c = multiply_rows(&a, &b, 100).unwrap();
    assert_eq!(c, multiply_sequential(&a, &b).unwrap());
}

#[test]
fn test_block_partition_is_clipped() {
    let units = partition::partition(Shape::new(5, 3), Strategy::BlockWise(4)).unwrap();
    let regions: Vec<Region> = units.iter().map(|u| u.region(Shape::new(5, 3))).collect();
    assert_eq!(regions.len(), 2);
    assert_eq!(regions[1].rows(), 4..5);
    assert_eq!(regions[1].cols(), 0..3);
}
