//! # exprcalc-core
//!
//! Core library for the exprcalc calculator: the evaluation data model,
//! syntax validation, and arithmetic evaluation.

pub mod calculator;
pub mod cancel;
pub mod constants;
pub mod format;
pub mod model;
pub mod options;
pub mod validator;

// Re-exports
pub use calculator::{ArithmeticCalculator, CalcError, Calculator};
pub use cancel::CancellationToken;
pub use constants::{exit_codes, INVALID_EXPRESSION_MESSAGE};
pub use model::{EvaluationResult, OutcomeModel, OutcomeStatus, ValidationResult};
pub use options::CalcOptions;
pub use validator::{SyntaxValidator, Validator};

/// Validate and evaluate `expression` on the calling thread.
///
/// This is a convenience function for simple use cases. The application
/// runs both steps concurrently through the orchestration crate.
///
/// # Example
/// ```
/// use exprcalc_core::OutcomeStatus;
///
/// let outcome = exprcalc_core::evaluate("2+2").unwrap();
/// assert_eq!(outcome.status(), OutcomeStatus::Success);
/// assert_eq!(outcome.display(), "4");
///
/// let outcome = exprcalc_core::evaluate("2+Q").unwrap();
/// assert_eq!(outcome.display(), "Error: Invalid Expression");
/// ```
pub fn evaluate(expression: &str) -> Result<OutcomeModel, CalcError> {
    let validation = SyntaxValidator::new().validate_expression(expression)?;
    let evaluation = ArithmeticCalculator::new().evaluate_expression(expression)?;
    Ok(OutcomeModel::merge(validation, evaluation))
}
