//! UI helpers for CLI display.

use console::style;

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Print a computed value on stdout.
pub fn print_value(text: &str) {
    if is_color_disabled() {
        println!("{text}");
    } else {
        println!("{}", style(text).bold());
    }
}

/// Print a handled error message, such as an invalid expression, on stderr.
pub fn print_failure(text: &str) {
    if is_color_disabled() {
        eprintln!("{text}");
    } else {
        eprintln!("{}", style(text).for_stderr().red());
    }
}

/// Print an application error on stderr.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").for_stderr().red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_check_does_not_panic() {
        let _ = is_color_disabled();
    }

    #[test]
    fn print_value_does_not_panic() {
        print_value("4");
        print_value("");
    }

    #[test]
    fn print_failure_does_not_panic() {
        print_failure("Error: Invalid Expression");
    }

    #[test]
    fn print_error_does_not_panic() {
        print_error("evaluation timed out after 5s");
        print_error("");
    }

    #[test]
    fn print_functions_with_unicode() {
        print_value("\u{221e}");
        print_failure("Expression invalide \u{2192} erreur");
        print_error("\u{00e9}chec");
    }
}
