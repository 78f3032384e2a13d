//! Shared fakes for the workspace integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use exprcalc_core::{CalcError, Calculator, EvaluationResult, ValidationResult, Validator};
use exprcalc_orchestration::{CalculatorView, MainLoopScheduler, Scheduler, SchedulerProvider};

/// A view command recorded by [`RecordingView`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Display(String),
    Error(String),
    Restart,
}

/// View with a fixed expression that records every command it receives.
pub struct RecordingView {
    expression: Mutex<String>,
    reads: AtomicUsize,
    events: Mutex<Vec<Recorded>>,
}

impl RecordingView {
    #[must_use]
    pub fn new(expression: &str) -> Self {
        Self {
            expression: Mutex::new(expression.to_string()),
            reads: AtomicUsize::new(0),
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn set_expression(&self, expression: &str) {
        *self.expression.lock() = expression.to_string();
    }

    #[must_use]
    pub fn events(&self) -> Vec<Recorded> {
        self.events.lock().clone()
    }

    /// How many times the presenter read the expression.
    #[must_use]
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl CalculatorView for RecordingView {
    fn current_expression(&self) -> String {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.expression.lock().clone()
    }

    fn set_display(&self, text: &str) {
        self.events.lock().push(Recorded::Display(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        self.events.lock().push(Recorded::Error(text.to_string()));
    }

    fn restart_feature(&self) {
        self.events.lock().push(Recorded::Restart);
    }
}

/// Meeting point for two branches that must run at the same time.
///
/// Each party calls [`arrive`](Rendezvous::arrive) and waits for the other;
/// if the other never shows up the wait gives up after `patience`.
pub struct Rendezvous {
    arrived: Mutex<usize>,
    cv: Condvar,
    patience: Duration,
}

impl Rendezvous {
    #[must_use]
    pub fn new(patience: Duration) -> Arc<Self> {
        Arc::new(Self {
            arrived: Mutex::new(0),
            cv: Condvar::new(),
            patience,
        })
    }

    /// Returns `true` if both parties met.
    pub fn arrive(&self) -> bool {
        let mut arrived = self.arrived.lock();
        *arrived += 1;
        self.cv.notify_all();
        while *arrived < 2 {
            if self.cv.wait_for(&mut arrived, self.patience).timed_out() {
                return *arrived >= 2;
            }
        }
        true
    }
}

/// Validator that accepts everything once it has met the calculator.
pub struct RendezvousValidator(pub Arc<Rendezvous>);

impl Validator for RendezvousValidator {
    fn validate_expression(&self, expression: &str) -> Result<ValidationResult, CalcError> {
        if self.0.arrive() {
            Ok(ValidationResult::valid(expression))
        } else {
            Err(CalcError::Validation("calculator never ran alongside".into()))
        }
    }
}

/// Calculator that answers `answer` once it has met the validator.
pub struct RendezvousCalculator {
    pub meeting: Arc<Rendezvous>,
    pub answer: &'static str,
}

impl Calculator for RendezvousCalculator {
    fn evaluate_expression(&self, _expression: &str) -> Result<EvaluationResult, CalcError> {
        if self.meeting.arrive() {
            Ok(EvaluationResult::new(self.answer))
        } else {
            Err(CalcError::Evaluation("validator never ran alongside".into()))
        }
    }
}

/// Calculator that counts its calls and echoes the input back.
#[derive(Default)]
pub struct EchoCalculator {
    calls: AtomicUsize,
}

impl EchoCalculator {
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Calculator for EchoCalculator {
    fn evaluate_expression(&self, expression: &str) -> Result<EvaluationResult, CalcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(EvaluationResult::new(expression))
    }
}

/// Calculator that always faults.
pub struct FaultyCalculator;

impl Calculator for FaultyCalculator {
    fn evaluate_expression(&self, _expression: &str) -> Result<EvaluationResult, CalcError> {
        Err(CalcError::Evaluation("calculator offline".into()))
    }
}

/// Computation on a worker pool, UI delivery on a manually drained queue.
pub struct PoolAndQueue {
    pub pool: Arc<dyn Scheduler>,
    pub queue: Arc<MainLoopScheduler>,
}

impl SchedulerProvider for PoolAndQueue {
    fn computation(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.pool)
    }

    fn ui(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.queue) as Arc<dyn Scheduler>
    }
}

/// Everything, computation included, on a manually drained queue.
pub struct QueuedSchedulers(pub Arc<MainLoopScheduler>);

impl SchedulerProvider for QueuedSchedulers {
    fn computation(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.0) as Arc<dyn Scheduler>
    }

    fn ui(&self) -> Arc<dyn Scheduler> {
        Arc::clone(&self.0) as Arc<dyn Scheduler>
    }
}
