//! Calculator trait, the fasteval-backed `ArithmeticCalculator`, and the
//! error type shared across the workspace.

use std::borrow::Cow;

use tracing::trace;

use crate::constants::INVALID_EXPRESSION_MESSAGE;
use crate::format::format_value;
use crate::model::EvaluationResult;
use crate::options::CalcOptions;

/// Error type for unexpected faults during an evaluation.
///
/// An expression the user typed wrong is *not* a `CalcError`; it is a
/// failure outcome. These variants are the fatal tier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalcError {
    /// The validator itself failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The calculator itself failed.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// A worker panicked while running a branch.
    #[error("worker panicked: {0}")]
    Panicked(String),

    /// The subscription was disposed before a result was produced.
    #[error("evaluation disposed before completion")]
    Disposed,

    /// No result arrived within the allowed time.
    #[error("evaluation timed out after {0}")]
    Timeout(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CalcError {
    /// Build a `Panicked` error from a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::Panicked(message)
    }
}

/// Evaluates a raw input string into display text.
pub trait Calculator: Send + Sync {
    /// Evaluate `expression`.
    ///
    /// Input that cannot be evaluated still returns `Ok`; `Err` is reserved
    /// for faults of the calculator itself.
    fn evaluate_expression(&self, expression: &str) -> Result<EvaluationResult, CalcError>;
}

/// Calculator backed by `fasteval` with an empty variable namespace.
#[derive(Debug, Clone, Default)]
pub struct ArithmeticCalculator {
    opts: CalcOptions,
}

impl ArithmeticCalculator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_options(opts: CalcOptions) -> Self {
        Self {
            opts: opts.normalize(),
        }
    }

    /// Evaluate to a raw `f64`, or `None` if fasteval cannot parse the input.
    #[must_use]
    pub fn eval_f64(expression: &str) -> Option<f64> {
        let mut ns = fasteval::EmptyNamespace;
        let prepared = explicit_signs(expression.trim());
        match fasteval::ez_eval(&prepared, &mut ns) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(expression, error = ?err, "fasteval rejected expression");
                None
            }
        }
    }
}

/// Rewrite each unary `-` as `(0-operand)` and drop each unary `+`.
///
/// fasteval folds a leading sign into the number literal, so `-2^2` would
/// read as `(-2)^2`. The operand of a sign is the following power term, so
/// the rewrite keeps `^` binding tighter than negation. Input outside the
/// arithmetic grammar is returned unchanged for fasteval to reject.
fn explicit_signs(expression: &str) -> Cow<'_, str> {
    let Some(tokens) = tokenize(expression) else {
        return Cow::Borrowed(expression);
    };
    let mut writer = SignWriter {
        tokens: &tokens,
        pos: 0,
        out: String::with_capacity(expression.len() + 8),
    };
    match writer.expr() {
        Some(()) if writer.pos == tokens.len() => Cow::Owned(writer.out),
        _ => Cow::Borrowed(expression),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Number(&'a str),
    Operator(char),
    Open,
    Close,
}

fn tokenize(input: &str) -> Option<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((start, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '0'..='9' | '.' => {
                let mut end = start + 1;
                while let Some((i, _)) = chars.next_if(|&(_, d)| d.is_ascii_digit() || d == '.') {
                    end = i + 1;
                }
                tokens.push(Token::Number(&input[start..end]));
            }
            '(' => tokens.push(Token::Open),
            ')' => tokens.push(Token::Close),
            '+' | '-' | '*' | '/' | '%' | '^' => tokens.push(Token::Operator(c)),
            _ => return None,
        }
    }
    Some(tokens)
}

/// Recursive-descent copier over the token stream.
struct SignWriter<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    out: String,
}

impl<'a> SignWriter<'_, 'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn expr(&mut self) -> Option<()> {
        self.operand()?;
        while let Some(Token::Operator(op)) = self.peek() {
            self.pos += 1;
            self.out.push(op);
            self.operand()?;
        }
        Some(())
    }

    fn operand(&mut self) -> Option<()> {
        match self.peek()? {
            Token::Operator('-') => {
                self.pos += 1;
                self.out.push_str("(0-");
                self.operand()?;
                self.out.push(')');
                Some(())
            }
            Token::Operator('+') => {
                self.pos += 1;
                self.operand()
            }
            _ => self.power(),
        }
    }

    // `^` is right-associative and its exponent may carry its own sign.
    fn power(&mut self) -> Option<()> {
        self.atom()?;
        if self.peek() == Some(Token::Operator('^')) {
            self.pos += 1;
            self.out.push('^');
            self.operand()?;
        }
        Some(())
    }

    fn atom(&mut self) -> Option<()> {
        match self.peek()? {
            Token::Number(text) => {
                self.pos += 1;
                self.out.push_str(text);
                Some(())
            }
            Token::Open => {
                self.pos += 1;
                self.out.push('(');
                self.expr()?;
                if self.peek()? != Token::Close {
                    return None;
                }
                self.pos += 1;
                self.out.push(')');
                Some(())
            }
            _ => None,
        }
    }
}

impl Calculator for ArithmeticCalculator {
    fn evaluate_expression(&self, expression: &str) -> Result<EvaluationResult, CalcError> {
        let value = match Self::eval_f64(expression) {
            Some(v) => format_value(v, self.opts.precision),
            None => INVALID_EXPRESSION_MESSAGE.to_string(),
        };
        Ok(EvaluationResult::new(value))
    }
}
