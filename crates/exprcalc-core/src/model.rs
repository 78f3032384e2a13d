//! Data model shared by the validator, the calculator, and the use-case.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of validating a raw expression.
///
/// `value` holds the original expression when valid, or the message to show
/// the user when invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub value: String,
}

impl ValidationResult {
    /// A successful validation carrying the checked expression.
    #[must_use]
    pub fn valid(expression: impl Into<String>) -> Self {
        Self {
            is_valid: true,
            value: expression.into(),
        }
    }

    /// A failed validation carrying a user-facing message.
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            value: message.into(),
        }
    }
}

/// Text produced by the calculator for one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    pub value: String,
}

impl EvaluationResult {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Whether an evaluation produced a value or a handled error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
    Success,
    Failure,
}

impl fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// Final, merged outcome of one evaluation call.
///
/// Only constructible through [`OutcomeModel::success`] and
/// [`OutcomeModel::failure`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeModel {
    status: OutcomeStatus,
    display: String,
}

impl OutcomeModel {
    /// Outcome carrying a computed value.
    #[must_use]
    pub fn success(display: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            display: display.into(),
        }
    }

    /// Outcome carrying the message for an invalid expression.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Failure,
            display: message.into(),
        }
    }

    #[must_use]
    pub fn status(&self) -> OutcomeStatus {
        self.status
    }

    /// The computed value or the error message.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == OutcomeStatus::Success
    }

    /// Merge one validation and one evaluation into the final outcome.
    ///
    /// An invalid validation always wins; the evaluation is then discarded.
    #[must_use]
    pub fn merge(validation: ValidationResult, evaluation: EvaluationResult) -> Self {
        if !validation.is_valid {
            return Self::failure(validation.value);
        }
        Self::success(evaluation.value)
    }
}
