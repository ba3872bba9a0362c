//! Criterion benchmarks comparing the multiplication strategies.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use matmul_engine::matrix::generate;
use matmul_engine::{Strategy, default_block_size, default_worker_count, multiply};

fn bench_strategies(c: &mut Criterion) {
    let workers = default_worker_count();
    let mut group = c.benchmark_group("multiply");
    group.sample_size(20);

    for size in [64, 128, 256] {
        let a = generate::seeded(1, size, size, 1, 100).unwrap();
        let b = generate::seeded(2, size, size, 1, 100).unwrap();

        let strategies = [
            (Strategy::Whole, 1),
            (Strategy::RowWise, workers),
            (Strategy::BlockWise(default_block_size(size)), workers),
            (Strategy::DataParallel, workers),
        ];

        for (strategy, n) in strategies {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                &(&a, &b),
                |bench, (a, b)| bench.iter(|| multiply(black_box(a), black_box(b), strategy, n).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_block_sizes(c: &mut Criterion) {
    let size = 256;
    let workers = default_worker_count();
    let a = generate::seeded(3, size, size, 1, 100).unwrap();
    let b = generate::seeded(4, size, size, 1, 100).unwrap();

    let mut group = c.benchmark_group("block_size");
    group.sample_size(20);
    for block in [8, 16, 32, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(block), &block, |bench, &block| {
            bench.iter(|| multiply(&a, &b, Strategy::BlockWise(block), workers).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_block_sizes);
criterion_main!(benches);
