//! Drives one presenter per expression and drains the UI queue.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;

use exprcalc_core::{
    ArithmeticCalculator, CalcError, CalcOptions, CancellationToken, SyntaxValidator,
};
use exprcalc_orchestration::{
    AppSchedulers, CalculatorPresenter, CalculatorView, EvaluateExpression, EvaluateUseCase,
    SchedulerProvider,
};

use crate::view::{CliView, ViewEvent};

/// Longest single wait on the UI queue, so interrupts are noticed promptly.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What happened to one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// The presenter issued a view command.
    Event(ViewEvent),
    /// Nothing arrived before the deadline; the work was disposed.
    TimedOut,
    /// The session was interrupted; the work was disposed.
    Canceled,
}

/// Evaluates expressions one at a time on the application schedulers.
pub struct CliSession {
    schedulers: Arc<AppSchedulers>,
    eval: Arc<EvaluateExpression>,
    cancel: CancellationToken,
    timeout: Duration,
}

impl CliSession {
    /// Build the schedulers and the use-case.
    pub fn new(
        threads: usize,
        options: CalcOptions,
        timeout: Duration,
        cancel: CancellationToken,
    ) -> Result<Self, CalcError> {
        let schedulers = Arc::new(AppSchedulers::new(threads)?);
        let eval = Arc::new(EvaluateExpression::new(
            Arc::new(ArithmeticCalculator::with_options(options)),
            Arc::new(SyntaxValidator::new()),
            Arc::clone(&schedulers) as Arc<dyn SchedulerProvider>,
        ));
        Ok(Self {
            schedulers,
            eval,
            cancel,
            timeout,
        })
    }

    /// Evaluate `expression` and wait for the view command it produces.
    pub fn evaluate(&self, expression: &str) -> Evaluation {
        let view = Arc::new(CliView::new(expression));
        let presenter = CalculatorPresenter::new(
            Arc::clone(&view) as Arc<dyn CalculatorView>,
            Arc::clone(&self.schedulers) as Arc<dyn SchedulerProvider>,
            Arc::clone(&self.eval) as Arc<EvaluateUseCase>,
        );
        presenter.on_evaluate_click();

        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(event) = view.take_events().into_iter().next() {
                debug!(expression, ?event, "view updated");
                return Evaluation::Event(event);
            }
            if self.cancel.is_cancelled() {
                presenter.on_destroy();
                return Evaluation::Canceled;
            }
            let now = Instant::now();
            if now >= deadline {
                debug!(expression, timeout = ?self.timeout, "evaluation timed out");
                presenter.on_destroy();
                return Evaluation::TimedOut;
            }
            self.schedulers
                .main_loop()
                .run_next((deadline - now).min(POLL_INTERVAL));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exprcalc_core::INVALID_EXPRESSION_MESSAGE;

    fn session(timeout: Duration) -> (CliSession, CancellationToken) {
        let cancel = CancellationToken::new();
        let session =
            CliSession::new(2, CalcOptions::default(), timeout, cancel.clone()).unwrap();
        (session, cancel)
    }

    #[test]
    fn valid_expression_displays() {
        let (session, _) = session(Duration::from_secs(5));
        assert_eq!(
            session.evaluate("2+2"),
            Evaluation::Event(ViewEvent::Display("4".into()))
        );
    }

    #[test]
    fn invalid_expression_shows_error() {
        let (session, _) = session(Duration::from_secs(5));
        assert_eq!(
            session.evaluate("2+Q"),
            Evaluation::Event(ViewEvent::Error(INVALID_EXPRESSION_MESSAGE.into()))
        );
    }

    #[test]
    fn sequential_expressions_are_independent() {
        let (session, _) = session(Duration::from_secs(5));
        for (expr, want) in [("1+1", "2"), ("10/4", "2.5"), ("2^10", "1024")] {
            assert_eq!(
                session.evaluate(expr),
                Evaluation::Event(ViewEvent::Display(want.into())),
                "{expr}"
            );
        }
    }

    #[test]
    fn zero_timeout_times_out() {
        let (session, _) = session(Duration::ZERO);
        assert_eq!(session.evaluate("2+2"), Evaluation::TimedOut);
    }

    #[test]
    fn cancelled_session_stops() {
        let (session, cancel) = session(Duration::from_secs(5));
        cancel.cancel();
        assert_eq!(session.evaluate("2+2"), Evaluation::Canceled);
    }
}
