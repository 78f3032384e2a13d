//! Display formatting for computed values.

use crate::constants::INTEGER_DISPLAY_LIMIT;

/// Format a computed value for the display.
///
/// Integral values print without a fractional part, other values keep at
/// most `precision` fractional digits with trailing zeros removed.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_value(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        };
    }

    if value.fract() == 0.0 && value.abs() < INTEGER_DISPLAY_LIMIT {
        // -0.0 as i64 is 0, so negative zero never reaches the display.
        return (value as i64).to_string();
    }

    let formatted = format!("{value:.precision$}");
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers() {
        assert_eq!(format_value(4.0, 10), "4");
        assert_eq!(format_value(-12.0, 10), "-12");
        assert_eq!(format_value(0.0, 10), "0");
        assert_eq!(format_value(-0.0, 10), "0");
    }

    #[test]
    fn decimals_are_trimmed() {
        assert_eq!(format_value(2.5, 10), "2.5");
        assert_eq!(format_value(0.1 + 0.2, 10), "0.3");
        assert_eq!(format_value(1.0 / 3.0, 4), "0.3333");
    }

    #[test]
    fn zero_precision_keeps_integer_digits() {
        assert_eq!(format_value(10.4, 0), "10");
        assert_eq!(format_value(1e16 + 2.0, 0), "10000000000000002");
    }

    #[test]
    fn tiny_negative_rounds_to_zero() {
        assert_eq!(format_value(-1e-12, 10), "0");
    }

    #[test]
    fn large_values_use_plain_digits() {
        assert_eq!(format_value(1e20, 10), "100000000000000000000");
    }

    #[test]
    fn non_finite() {
        assert_eq!(format_value(f64::NAN, 10), "NaN");
        assert_eq!(format_value(f64::INFINITY, 10), "Infinity");
        assert_eq!(format_value(f64::NEG_INFINITY, 10), "-Infinity");
    }
}
