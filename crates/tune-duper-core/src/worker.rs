use crate::error::Error;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;

/// Bounded pool for the CPU-bound parts of a scan.
pub struct WorkerPool {
    pool: ThreadPool,
}

impl WorkerPool {
    /// `num_threads == 0` sizes the pool to the available cores.
    pub fn new(num_threads: usize) -> Result<Self, Error> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("tune-duper-worker-{}", i))
            .build()
            .map_err(|e| Error::Worker(format!("Failed to build worker pool: {}", e)))?;
        Ok(Self { pool })
    }

    pub fn current_num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Submit `job` and block until it finishes. A panic inside the job is
    /// caught on the worker and returned as [`Error::Worker`].
    ///
    /// Must not be called from one of this pool's own threads.
    pub fn run<F, T>(&self, job: F) -> Result<T, Error>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        self.pool.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(job));
            let _ = tx.send(outcome);
        });

        match rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(Error::Worker(panic_message(payload.as_ref()))),
            Err(_) => Err(Error::Worker(
                "worker exited without returning a result".to_string(),
            )),
        }
    }

    /// Run `op` inside the pool so rayon parallel iterators it starts are
    /// bounded by the pool size.
    pub fn install<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}
