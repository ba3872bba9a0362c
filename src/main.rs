//! Benchmark runner for the multiplication strategies.
//!
//! Usage: `matmul-engine [size ...]` (defaults to 50 100 200 300).
//! Set `RUST_LOG=debug` to see pool dispatch events.

use std::env;
use std::process;

use matmul_engine::benchmark::{self, BenchmarkResult};
use matmul_engine::matrix::generate;
use matmul_engine::{Strategy, default_worker_count};

const DEFAULT_SIZES: [usize; 4] = [50, 100, 200, 300];
const WARMUP_ROUNDS: usize = 5;
const CORRECTNESS_SIZE: usize = 10;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let sizes = parse_sizes(env::args().skip(1))?;

    println!("=== Matrix Multiplication Benchmark ===\n");
    println!("Available workers: {}\n", default_worker_count());

    benchmark::warm_up(WARMUP_ROUNDS)?;

    let a = generate::random(CORRECTNESS_SIZE, CORRECTNESS_SIZE, 1, 10)?;
    let b = generate::random(CORRECTNESS_SIZE, CORRECTNESS_SIZE, 1, 10)?;
    if let Err(e) = benchmark::cross_check(&a, &b, &benchmark::standard_cases(CORRECTNESS_SIZE)) {
        eprintln!("Correctness check failed: {}", e);
        process::exit(1);
    }
    println!("All strategies produce identical results\n");

    let mut all_results = Vec::new();
    for &size in &sizes {
        println!("Matrix: {}×{}", size, size);
        println!("{}", "-".repeat(60));

        let a = generate::random_square(size)?;
        let b = generate::random_square(size)?;
        let results = benchmark::compare(&a, &b, &benchmark::standard_cases(size));

        let baseline = results[0].millis();
        for (i, result) in results.iter().enumerate() {
            match &result.outcome {
                Ok(()) => println!(
                    "{}. {:18} {:10.2} ms  ({:.1}×)",
                    i + 1,
                    result.label,
                    result.millis(),
                    baseline / result.millis()
                ),
                Err(message) => println!("{}. {:18} FAILED - {}", i + 1, result.label, message),
            }
        }
        if let Some(best) = benchmark::fastest(&results) {
            println!("\nFastest: {} ({:.2} ms)", best.label, best.millis());
        }
        println!();

        all_results.push((size, results));
    }

    print_summary_table(&all_results);

    let mut rng = rand::thread_rng();
    let scaling = benchmark::scalability(
        &mut rng,
        Strategy::DataParallel,
        default_worker_count(),
        &sizes,
    )?;
    print_scalability(&scaling);

    Ok(())
}

fn parse_sizes(args: impl Iterator<Item = String>) -> Result<Vec<usize>, Box<dyn std::error::Error>> {
    let sizes = args
        .map(|arg| arg.parse::<usize>())
        .collect::<Result<Vec<_>, _>>()?;

    if sizes.is_empty() {
        return Ok(DEFAULT_SIZES.to_vec());
    }
    if sizes.contains(&0) {
        return Err("matrix sizes must be positive".into());
    }
    Ok(sizes)
}

fn print_summary_table(all_results: &[(usize, Vec<BenchmarkResult>)]) {
    println!("{}", "=".repeat(90));
    println!("SUMMARY (ms)");
    println!("{}", "=".repeat(90));

    print!("\n{:<18}", "Method");
    for (size, _) in all_results {
        print!(" {:>12}", format!("{}×{}", size, size));
    }
    println!();
    println!("{}", "-".repeat(90));

    let num_methods = all_results.first().map_or(0, |(_, r)| r.len());
    for method_idx in 0..num_methods {
        print!("{:<18}", all_results[0].1[method_idx].label);
        for (_, results) in all_results {
            let result = &results[method_idx];
            if result.is_successful() {
                print!(" {:>12.2}", result.millis());
            } else {
                print!(" {:>12}", "failed");
            }
        }
        println!();
    }
    println!("{}", "=".repeat(90));
}

fn print_scalability(results: &[BenchmarkResult]) {
    println!("\nScalability: data-parallel");
    println!("{}", "-".repeat(40));
    println!("{:<10} | {:>15}", "Size", "Time (ms)");
    println!("{}", "-".repeat(40));
    for result in results {
        match &result.outcome {
            Ok(()) => println!("{:<10} | {:>15.2}", result.size, result.millis()),
            Err(message) => println!("{:<10} | FAILED: {}", result.size, message),
        }
    }
}
