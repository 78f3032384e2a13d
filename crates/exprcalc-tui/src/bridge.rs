//! Bridge between the presenter and TUI messages.

use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;

use exprcalc_orchestration::CalculatorView;

use crate::messages::TuiMessage;

/// Input line shared by the TUI model (writer) and the view (reader).
pub type ExpressionBuffer = Arc<Mutex<String>>;

/// Calculator view that forwards presenter commands to the TUI.
pub struct TuiView {
    input: ExpressionBuffer,
    tx: Sender<TuiMessage>,
}

impl TuiView {
    #[must_use]
    pub fn new(input: ExpressionBuffer, tx: Sender<TuiMessage>) -> Self {
        Self { input, tx }
    }
}

impl CalculatorView for TuiView {
    fn current_expression(&self) -> String {
        self.input.lock().clone()
    }

    fn set_display(&self, text: &str) {
        let _ = self.tx.try_send(TuiMessage::Display(text.to_string()));
    }

    fn show_error(&self, text: &str) {
        let _ = self.tx.try_send(TuiMessage::Error(text.to_string()));
    }

    fn restart_feature(&self) {
        let _ = self.tx.try_send(TuiMessage::Restart);
    }
}
