//! Calculation options.

use crate::constants::{DEFAULT_PRECISION, MAX_PRECISION};

/// Options for the arithmetic calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalcOptions {
    /// Maximum fractional digits in a displayed result.
    pub precision: usize,
}

impl Default for CalcOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl CalcOptions {
    /// Clamp out-of-range values.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.precision > MAX_PRECISION {
            self.precision = MAX_PRECISION;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_precision() {
        assert_eq!(CalcOptions::default().precision, DEFAULT_PRECISION);
    }

    #[test]
    fn normalize_clamps_precision() {
        let opts = CalcOptions { precision: 40 }.normalize();
        assert_eq!(opts.precision, MAX_PRECISION);
    }

    #[test]
    fn normalize_keeps_zero() {
        let opts = CalcOptions { precision: 0 }.normalize();
        assert_eq!(opts.precision, 0);
    }
}
