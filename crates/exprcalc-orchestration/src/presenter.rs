//! Calculator presenter.

use std::sync::Arc;

use tracing::{debug, warn};

use exprcalc_core::{CalcError, OutcomeModel, OutcomeStatus};

use crate::disposable::CompositeDisposable;
use crate::interfaces::{CalculatorView, EvaluateUseCase};
use crate::scheduler::SchedulerProvider;

/// Maps user actions onto the use-case and use-case results onto the view.
pub struct CalculatorPresenter {
    view: Arc<dyn CalculatorView>,
    schedulers: Arc<dyn SchedulerProvider>,
    eval: Arc<EvaluateUseCase>,
    subscriptions: CompositeDisposable,
}

impl CalculatorPresenter {
    #[must_use]
    pub fn new(
        view: Arc<dyn CalculatorView>,
        schedulers: Arc<dyn SchedulerProvider>,
        eval: Arc<EvaluateUseCase>,
    ) -> Self {
        Self {
            view,
            schedulers,
            eval,
            subscriptions: CompositeDisposable::new(),
        }
    }

    /// The user asked for the current expression to be evaluated.
    pub fn on_evaluate_click(&self) {
        let expression = self.view.current_expression();
        debug!(expression = %expression, "evaluate clicked");

        let view = Arc::clone(&self.view);
        let subscription = self
            .eval
            .execute(&expression)
            .observe_on(self.schedulers.ui())
            .subscribe(move |result| dispatch(view.as_ref(), result));
        self.subscriptions.add(subscription);
    }

    /// The view is going away; nothing may reach it after this.
    pub fn on_destroy(&self) {
        let disposed = self.subscriptions.dispose();
        debug!(disposed, "presenter destroyed");
        self.eval.clean();
    }
}

/// Route one result to the matching view command.
fn dispatch(view: &dyn CalculatorView, result: Result<OutcomeModel, CalcError>) {
    match result {
        Ok(outcome) => match outcome.status() {
            OutcomeStatus::Success => view.set_display(outcome.display()),
            OutcomeStatus::Failure => view.show_error(outcome.display()),
        },
        Err(err) => {
            warn!(error = %err, "evaluation failed fatally, restarting feature");
            view.restart_feature();
        }
    }
}
