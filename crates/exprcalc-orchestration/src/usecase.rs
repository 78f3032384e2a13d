//! The evaluate-expression use-case.
//!
//! Validation and evaluation are dispatched concurrently on the
//! computation scheduler, joined, and merged into one [`OutcomeModel`].
//! Evaluation runs even when validation rejects the input; its value is
//! then discarded.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use exprcalc_core::{Calculator, OutcomeModel, Validator};

use crate::disposable::CompositeDisposable;
use crate::interfaces::UseCase;
use crate::scheduler::SchedulerProvider;
use crate::single::Single;

/// Validates and evaluates an expression concurrently.
pub struct EvaluateExpression {
    calculator: Arc<dyn Calculator>,
    validator: Arc<dyn Validator>,
    schedulers: Arc<dyn SchedulerProvider>,
    disposables: Arc<CompositeDisposable>,
}

impl EvaluateExpression {
    #[must_use]
    pub fn new(
        calculator: Arc<dyn Calculator>,
        validator: Arc<dyn Validator>,
        schedulers: Arc<dyn SchedulerProvider>,
    ) -> Self {
        Self {
            calculator,
            validator,
            schedulers,
            disposables: Arc::new(CompositeDisposable::new()),
        }
    }

    /// Number of subscriptions tracked for [`clean`](UseCase::clean).
    #[must_use]
    pub fn tracked(&self) -> usize {
        self.disposables.len()
    }
}

impl UseCase<OutcomeModel> for EvaluateExpression {
    fn execute(&self, expression: &str) -> Single<OutcomeModel> {
        debug!(expression, "evaluate requested");
        let computation = self.schedulers.computation();

        let validation = {
            let validator = Arc::clone(&self.validator);
            let input = expression.to_string();
            Single::from_fn(move || {
                validator
                    .validate_expression(&input)
                    .inspect_err(|err| warn!(error = %err, "validation failed"))
            })
            .subscribe_on(Arc::clone(&computation))
        };

        let evaluation = {
            let calculator = Arc::clone(&self.calculator);
            let input = expression.to_string();
            Single::from_fn(move || {
                calculator
                    .evaluate_expression(&input)
                    .inspect_err(|err| warn!(error = %err, "evaluation failed"))
            })
            .subscribe_on(computation)
        };

        let disposables = Arc::clone(&self.disposables);
        Single::zip(validation, evaluation, |valid, evaluated| {
            let outcome = OutcomeModel::merge(valid, evaluated);
            trace!(status = %outcome.status(), "outcome merged");
            outcome
        })
        .on_subscribe(move |subscription| disposables.add(subscription))
    }

    fn clean(&self) {
        let disposed = self.disposables.dispose();
        debug!(disposed, "evaluate use-case cleaned");
    }
}
