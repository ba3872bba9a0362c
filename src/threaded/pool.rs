//! Fixed-size worker pool scoped to one call.
//!
//! Workers are named OS threads spawned inside `std::thread::scope`, so
//! they are always joined before [`run`] returns, including on timeout,
//! cancellation and task panics. Tasks are pulled from a shared queue; the
//! calling thread only blocks on the completion channel.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::ExecOptions;
use crate::error::{Error, Result};

/// Prefix of every worker thread name.
pub const WORKER_NAME_PREFIX: &str = "matmul-worker-";

/// Longest single wait before the caller re-checks cancellation.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Runs `work` once per task on `workers` threads and waits for all of them.
///
/// Each task runs to completion once started. When the timeout elapses or
/// the cancel token fires, queued tasks are abandoned, in-flight tasks
/// finish, every worker is joined and the error is returned. Panicking
/// tasks do not stop the others; they are reported together as
/// [`Error::TaskFailed`] after the barrier.
pub fn run<T, F>(tasks: Vec<T>, workers: usize, options: &ExecOptions, work: F) -> Result<()>
where
    T: Send,
    F: Fn(T) + Sync,
{
    let total = tasks.len();
    if total == 0 {
        return Ok(());
    }
    if options.is_cancelled() {
        return Err(Error::Interrupted);
    }
    let workers = workers.clamp(1, total);

    let queue = Mutex::new(tasks.into_iter());
    let abort = AtomicBool::new(false);
    let failures: Mutex<Vec<String>> = Mutex::new(Vec::new());
    let (done_tx, done_rx) = mpsc::channel::<()>();

    let waited = thread::scope(|scope| {
        let (queue, abort, failures, work) = (&queue, &abort, &failures, &work);
        let mut handles = Vec::with_capacity(workers);

        for id in 0..workers {
            let done_tx = done_tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("{}{}", WORKER_NAME_PREFIX, id))
                .spawn_scoped(scope, move || {
                    worker_loop(queue, abort, failures, work, done_tx)
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(e) => {
                    abort.store(true, Ordering::Release);
                    return Err(Error::PoolStart(e.to_string()));
                }
            }
        }
        drop(done_tx);
        debug!(workers, units = total, "worker pool started");

        let waited = wait_for(&done_rx, total, options);
        if waited.is_err() {
            abort.store(true, Ordering::Release);
        }

        for handle in handles {
            if let Err(payload) = handle.join() {
                lock(failures).push(panic_message(payload.as_ref()));
            }
        }
        waited
    });

    if let Err(e) = &waited {
        warn!(error = %e, "worker pool stopped before completion");
    }
    waited?;

    let failures = failures.into_inner().unwrap_or_else(PoisonError::into_inner);
    if let Some(first) = failures.first() {
        return Err(Error::TaskFailed {
            failed: failures.len(),
            total,
            message: first.clone(),
        });
    }
    Ok(())
}

fn worker_loop<T, F>(
    queue: &Mutex<std::vec::IntoIter<T>>,
    abort: &AtomicBool,
    failures: &Mutex<Vec<String>>,
    work: &F,
    done: mpsc::Sender<()>,
) where
    F: Fn(T),
{
    while !abort.load(Ordering::Acquire) {
        let Some(task) = lock(queue).next() else {
            break;
        };
        if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| work(task))) {
            lock(failures).push(panic_message(payload.as_ref()));
        }
        if done.send(()).is_err() {
            break;
        }
    }
}

/// Blocks until `total` completions arrive, the deadline passes or the
/// caller cancels.
fn wait_for(done: &Receiver<()>, total: usize, options: &ExecOptions) -> Result<()> {
    let deadline = Instant::now() + options.timeout;
    let mut completed = 0;

    while completed < total {
        if options.is_cancelled() {
            return Err(Error::Interrupted);
        }
        let now = Instant::now();
        if now >= deadline {
            return Err(Error::Timeout {
                timeout: options.timeout,
                completed,
                total,
            });
        }
        match done.recv_timeout((deadline - now).min(POLL_INTERVAL)) {
            Ok(()) => completed += 1,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    if completed < total {
        return Err(Error::TaskFailed {
            failed: total - completed,
            total,
            message: "workers exited before finishing their units".to_string(),
        });
    }
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "work unit panicked".to_string()
    }
}
