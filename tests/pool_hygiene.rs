//! No worker thread may outlive the call that spawned it.
//!
//! Kept as the only test in this binary so no other test spawns workers
//! while the thread list is inspected.

#![cfg(target_os = "linux")]

use std::fs;
use std::thread;
use std::time::Duration;

use matmul_engine::matrix::generate;
use matmul_engine::threaded::{data_parallel, pool};
use matmul_engine::{CancelToken, Error, ExecOptions, Strategy, multiply, multiply_with};

/// Names of this process's threads that belong to a multiplication pool.
fn live_workers() -> Vec<String> {
    let mut names = Vec::new();
    let Ok(tasks) = fs::read_dir("/proc/self/task") else {
        return names;
    };
    for task in tasks.flatten() {
        if let Ok(comm) = fs::read_to_string(task.path().join("comm")) {
            let comm = comm.trim().to_string();
            // comm is truncated to 15 bytes
            if comm.starts_with(&pool::WORKER_NAME_PREFIX[..8])
                || comm.starts_with(&data_parallel::WORKER_NAME_PREFIX[..8])
            {
                names.push(comm);
            }
        }
    }
    names
}

/// Joined threads can take a moment to disappear from procfs.
fn assert_no_workers(context: &str) {
    for _ in 0..100 {
        if live_workers().is_empty() {
            return;
        }
        thread::sleep(Duration::from_millis(5));
    }
    panic!("{}: workers still alive: {:?}", context, live_workers());
}

#[test]
fn test_no_worker_outlives_a_call() {
    let a = generate::seeded(1, 64, 64, -50, 50).unwrap();
    let b = generate::seeded(2, 64, 64, -50, 50).unwrap();
    assert_no_workers("before any call");

    // success paths
    for strategy in [Strategy::RowWise, Strategy::BlockWise(8), Strategy::DataParallel] {
        multiply(&a, &b, strategy, 4).unwrap();
        assert_no_workers(&format!("after {}", strategy));
    }

    // timeout path
    let options = ExecOptions::default().with_timeout(Duration::ZERO);
    for strategy in [Strategy::RowWise, Strategy::DataParallel] {
        let err = multiply_with(&a, &b, strategy, 4, &options).unwrap_err();
        assert!(matches!(err, Error::Timeout { .. }), "{}: {}", strategy, err);
        assert_no_workers(&format!("after timed out {}", strategy));
    }

    // cancellation path
    let token = CancelToken::new();
    token.cancel();
    let options = ExecOptions::default().with_cancel(token);
    let err = multiply_with(&a, &b, Strategy::BlockWise(4), 4, &options).unwrap_err();
    assert!(matches!(err, Error::Interrupted));
    assert_no_workers("after cancellation");

    // failing units
    let err = pool::run(vec![(); 8], 4, &ExecOptions::default(), |_| panic!("boom")).unwrap_err();
    assert!(matches!(err, Error::TaskFailed { failed: 8, total: 8, .. }));
    assert_no_workers("after failing units");
}
