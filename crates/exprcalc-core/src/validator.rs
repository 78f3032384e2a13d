//! Syntax validation for arithmetic expressions.
//!
//! `Validator` is the trait consumed by the use-case; `SyntaxValidator` is
//! the default implementation, a single left-to-right scan that tracks
//! whether an operand or an operator is expected next.

use std::fmt;

use tracing::trace;

use crate::calculator::CalcError;
use crate::constants::{
    BINARY_OPERATORS, INVALID_EXPRESSION_MESSAGE, MAX_EXPRESSION_LEN, MAX_NESTING_DEPTH,
};
use crate::model::ValidationResult;

/// Checks whether a raw input string is a well-formed arithmetic expression.
pub trait Validator: Send + Sync {
    /// Validate `expression`.
    ///
    /// A rejected expression is `Ok` with `is_valid == false`; `Err` is
    /// reserved for faults of the validator itself.
    fn validate_expression(&self, expression: &str) -> Result<ValidationResult, CalcError>;
}

/// Why an expression was rejected. Logged, never shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxIssue {
    Empty,
    TooLong,
    TooDeep,
    UnexpectedChar(char),
    MalformedNumber,
    MissingOperand,
    MissingOperator,
    UnbalancedParens,
    RepeatedSign,
}

impl fmt::Display for SyntaxIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty expression"),
            Self::TooLong => write!(f, "longer than {MAX_EXPRESSION_LEN} characters"),
            Self::TooDeep => write!(f, "nested deeper than {MAX_NESTING_DEPTH} levels"),
            Self::UnexpectedChar(c) => write!(f, "unexpected character {c:?}"),
            Self::MalformedNumber => f.write_str("malformed number"),
            Self::MissingOperand => f.write_str("operator without operand"),
            Self::MissingOperator => f.write_str("operand without operator"),
            Self::UnbalancedParens => f.write_str("unbalanced parentheses"),
            Self::RepeatedSign => f.write_str("repeated unary sign"),
        }
    }
}

/// Grammar-checking validator for `+ - * / % ^`, parentheses, and decimals.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxValidator;

impl SyntaxValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Scan `input` and report the first syntax problem, if any.
    pub fn check(input: &str) -> Result<(), SyntaxIssue> {
        let expr = input.trim();
        if expr.is_empty() {
            return Err(SyntaxIssue::Empty);
        }
        if expr.chars().count() > MAX_EXPRESSION_LEN {
            return Err(SyntaxIssue::TooLong);
        }

        let mut chars = expr.chars().peekable();
        let mut depth = 0usize;
        let mut expect_operand = true;
        let mut sign_seen = false;

        while let Some(c) = chars.next() {
            match c {
                ' ' | '\t' => {}
                '0'..='9' => {
                    if !expect_operand {
                        return Err(SyntaxIssue::MissingOperator);
                    }
                    while chars.next_if(char::is_ascii_digit).is_some() {}
                    if chars.next_if_eq(&'.').is_some()
                        && chars.next_if(char::is_ascii_digit).is_none()
                    {
                        return Err(SyntaxIssue::MalformedNumber);
                    }
                    while chars.next_if(char::is_ascii_digit).is_some() {}
                    if chars.peek() == Some(&'.') {
                        return Err(SyntaxIssue::MalformedNumber);
                    }
                    expect_operand = false;
                    sign_seen = false;
                }
                '.' => return Err(SyntaxIssue::MalformedNumber),
                '(' => {
                    if !expect_operand {
                        return Err(SyntaxIssue::MissingOperator);
                    }
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(SyntaxIssue::TooDeep);
                    }
                    sign_seen = false;
                }
                ')' => {
                    if depth == 0 {
                        return Err(SyntaxIssue::UnbalancedParens);
                    }
                    if expect_operand {
                        return Err(SyntaxIssue::MissingOperand);
                    }
                    depth -= 1;
                }
                '+' | '-' if expect_operand => {
                    if sign_seen {
                        return Err(SyntaxIssue::RepeatedSign);
                    }
                    sign_seen = true;
                }
                op if BINARY_OPERATORS.contains(&op) => {
                    if expect_operand {
                        return Err(SyntaxIssue::MissingOperand);
                    }
                    expect_operand = true;
                }
                other => return Err(SyntaxIssue::UnexpectedChar(other)),
            }
        }

        if expect_operand {
            return Err(SyntaxIssue::MissingOperand);
        }
        if depth != 0 {
            return Err(SyntaxIssue::UnbalancedParens);
        }
        Ok(())
    }
}

impl Validator for SyntaxValidator {
    fn validate_expression(&self, expression: &str) -> Result<ValidationResult, CalcError> {
        match Self::check(expression) {
            Ok(()) => Ok(ValidationResult::valid(expression)),
            Err(issue) => {
                trace!(expression, %issue, "expression rejected");
                Ok(ValidationResult::invalid(INVALID_EXPRESSION_MESSAGE))
            }
        }
    }
}
