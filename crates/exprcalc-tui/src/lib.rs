//! # exprcalc-tui
//!
//! Interactive calculator using ratatui with Elm architecture.

pub mod bridge;
pub mod display;
pub mod footer;
pub mod header;
pub mod history;
pub mod keymap;
pub mod logs;
pub mod messages;
pub mod model;
pub mod styles;

pub use bridge::{ExpressionBuffer, TuiView};
pub use history::HistoryScroll;
pub use keymap::KeyAction;
pub use logs::LogForwarder;
pub use messages::TuiMessage;
pub use model::TuiApp;
