//! exprcalc library: application logic for the expression calculator.

pub mod app;
pub mod config;
pub mod errors;
pub mod logging;
pub mod version;
