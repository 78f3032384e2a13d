//! Constants for expression validation, result formatting, and exit codes.

/// Message shown for any expression the validator rejects.
pub const INVALID_EXPRESSION_MESSAGE: &str = "Error: Invalid Expression";

/// Default number of fractional digits kept when displaying a result.
pub const DEFAULT_PRECISION: usize = 10;

/// Upper bound for the displayed fractional digits.
///
/// Beyond this, `f64` noise shows up in the output.
pub const MAX_PRECISION: usize = 15;

/// Longest expression (in characters) the validator accepts.
pub const MAX_EXPRESSION_LEN: usize = 256;

/// Deepest parenthesis nesting the validator accepts.
pub const MAX_NESTING_DEPTH: usize = 16;

/// Integral results below this magnitude are printed without a fractional part.
pub const INTEGER_DISPLAY_LIMIT: f64 = 1e15;

/// Binary operators understood by both the validator and the calculator.
pub const BINARY_OPERATORS: [char; 6] = ['+', '-', '*', '/', '%', '^'];

/// Process exit codes.
pub mod exit_codes {
    /// Every expression evaluated successfully.
    pub const SUCCESS: i32 = 0;
    /// At least one expression was rejected as invalid.
    pub const ERROR_INVALID_EXPRESSION: i32 = 1;
    /// Waiting for a result exceeded the configured timeout.
    pub const ERROR_TIMEOUT: i32 = 2;
    /// Validation or evaluation failed unexpectedly.
    pub const ERROR_FATAL: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
    /// Evaluation cancelled by user (Ctrl+C).
    pub const ERROR_CANCELED: i32 = 130;
}
