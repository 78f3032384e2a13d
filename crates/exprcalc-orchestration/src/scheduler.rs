//! Execution contexts.
//!
//! The use-case runs its branches on the computation scheduler; the
//! presenter delivers view commands on the UI scheduler. Both are injected
//! through a [`SchedulerProvider`] so tests can swap in inline execution.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::debug;

use exprcalc_core::CalcError;

/// A unit of work handed to a scheduler.
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Something that runs tasks, now or later, here or elsewhere.
pub trait Scheduler: Send + Sync {
    /// Submit a task.
    fn schedule(&self, task: Task);

    /// Name used in logs.
    fn name(&self) -> &str;
}

/// Supplies the execution contexts used by the use-case and the presenter.
pub trait SchedulerProvider: Send + Sync {
    /// Context for validation and evaluation work.
    fn computation(&self) -> Arc<dyn Scheduler>;

    /// UI-affine context on which results reach the view.
    fn ui(&self) -> Arc<dyn Scheduler>;
}

/// Computation scheduler backed by a rayon thread pool.
pub struct PoolScheduler {
    pool: ThreadPool,
}

impl PoolScheduler {
    /// Build a pool with `threads` workers; `0` lets rayon pick.
    pub fn new(threads: usize) -> Result<Self, CalcError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("exprcalc-compute-{i}"))
            .build()
            .map_err(|e| CalcError::Config(format!("thread pool: {e}")))?;
        debug!(threads = pool.current_num_threads(), "computation pool ready");
        Ok(Self { pool })
    }

    /// Number of worker threads.
    #[must_use]
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }
}

impl Scheduler for PoolScheduler {
    fn schedule(&self, task: Task) {
        self.pool.spawn(task);
    }

    fn name(&self) -> &str {
        "computation"
    }
}

/// Runs every task inline on the calling thread.
///
/// Deterministic; used by tests and by callers that are already off the
/// UI thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, task: Task) {
        task();
    }

    fn name(&self) -> &str {
        "immediate"
    }
}

/// Queue of tasks drained by the thread that owns the UI.
///
/// Tasks never run on the submitting thread; they run when the owner calls
/// [`run_pending`](Self::run_pending) or [`run_next`](Self::run_next).
pub struct MainLoopScheduler {
    tx: Sender<Task>,
    rx: Receiver<Task>,
}

impl MainLoopScheduler {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Run every queued task, including ones queued while draining.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        while let Ok(task) = self.rx.try_recv() {
            task();
            ran += 1;
        }
        ran
    }

    /// Wait up to `timeout` for one task and run it.
    pub fn run_next(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(task) => {
                task();
                true
            }
            Err(_) => false,
        }
    }

    /// Number of queued tasks.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Default for MainLoopScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for MainLoopScheduler {
    fn schedule(&self, task: Task) {
        // The receiver lives as long as self, so the send cannot fail.
        let _ = self.tx.send(task);
    }

    fn name(&self) -> &str {
        "main-loop"
    }
}

/// Production wiring: a rayon pool for computation, a main loop for the UI.
pub struct AppSchedulers {
    computation: Arc<PoolScheduler>,
    main_loop: Arc<MainLoopScheduler>,
}

impl AppSchedulers {
    pub fn new(threads: usize) -> Result<Self, CalcError> {
        Ok(Self {
            computation: Arc::new(PoolScheduler::new(threads)?),
            main_loop: Arc::new(MainLoopScheduler::new()),
        })
    }

    /// The UI queue, for the owning thread to drain.
    #[must_use]
    pub fn main_loop(&self) -> &Arc<MainLoopScheduler> {
        &self.main_loop
    }
}

impl SchedulerProvider for AppSchedulers {
    fn computation(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.computation) as Arc<dyn Scheduler>
    }

    fn ui(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.main_loop) as Arc<dyn Scheduler>
    }
}

/// Test wiring: everything runs inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImmediateSchedulers;

impl SchedulerProvider for ImmediateSchedulers {
    fn computation(&self) -> Arc<dyn Scheduler> {
        Arc::new(ImmediateScheduler)
    }

    fn ui(&self) -> Arc<dyn Scheduler> {
        Arc::new(ImmediateScheduler)
    }
}
