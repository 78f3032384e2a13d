//! TUI message types (Elm Messages).

use crate::keymap::KeyAction;

/// Messages that drive the TUI update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiMessage {
    /// A computed value to show.
    Display(String),
    /// A handled error message to show inline.
    Error(String),
    /// Unexpected failure; abandon in-flight work and reset the calculator.
    Restart,
    /// Free-form line for the history panel.
    Log(String),
    /// Quit the application.
    Quit,
    /// Tick event for periodic updates.
    Tick,
    /// Terminal resize event.
    Resize { width: u16, height: u16 },
    /// Key press event forwarded from the event loop.
    KeyPress(KeyAction),
}
