//! # exprcalc-cli
//!
//! One-shot CLI view, output formatting, and shell completion.

pub mod completion;
pub mod output;
pub mod session;
pub mod ui;
pub mod view;

pub use output::{OutputFormat, Rendered};
pub use session::{CliSession, Evaluation};
pub use view::{CliView, ViewEvent};
