//! One-shot view used in CLI mode.

use parking_lot::Mutex;

use exprcalc_core::OutcomeModel;
use exprcalc_orchestration::CalculatorView;

/// A view command received from the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    Display(String),
    Error(String),
    Restart,
}

impl ViewEvent {
    /// The outcome this event reports, if any. `Restart` carries none.
    #[must_use]
    pub fn outcome(&self) -> Option<OutcomeModel> {
        match self {
            Self::Display(text) => Some(OutcomeModel::success(text.as_str())),
            Self::Error(text) => Some(OutcomeModel::failure(text.as_str())),
            Self::Restart => None,
        }
    }
}

/// View holding one expression and recording every command it receives.
#[derive(Debug)]
pub struct CliView {
    expression: String,
    events: Mutex<Vec<ViewEvent>>,
}

impl CliView {
    #[must_use]
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            events: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Snapshot of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ViewEvent> {
        self.events.lock().clone()
    }

    /// Remove and return the recorded events.
    pub fn take_events(&self) -> Vec<ViewEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    fn record(&self, event: ViewEvent) {
        self.events.lock().push(event);
    }
}

impl CalculatorView for CliView {
    fn current_expression(&self) -> String {
        self.expression.clone()
    }

    fn set_display(&self, text: &str) {
        self.record(ViewEvent::Display(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        self.record(ViewEvent::Error(text.to_string()));
    }

    fn restart_feature(&self) {
        self.record(ViewEvent::Restart);
    }
}
