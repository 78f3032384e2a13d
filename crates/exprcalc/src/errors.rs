//! Error handling and exit codes.

use exprcalc_cli::{Evaluation, ViewEvent};
use exprcalc_core::constants::exit_codes;
use exprcalc_core::CalcError;

/// Exit code for an application error.
pub fn handle_error(err: &CalcError) -> i32 {
    match err {
        CalcError::Validation(_) | CalcError::Evaluation(_) | CalcError::Panicked(_) => {
            exit_codes::ERROR_FATAL
        }
        CalcError::Timeout(_) => exit_codes::ERROR_TIMEOUT,
        CalcError::Config(_) => exit_codes::ERROR_CONFIG,
        CalcError::Disposed => exit_codes::ERROR_CANCELED,
    }
}

/// Exit code for an error that escaped [`crate::app::run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<CalcError>()
        .map_or(exit_codes::ERROR_FATAL, handle_error)
}

/// Exit code for the outcome of one expression.
pub fn evaluation_code(evaluation: &Evaluation) -> i32 {
    match evaluation {
        Evaluation::Event(ViewEvent::Display(_)) => exit_codes::SUCCESS,
        Evaluation::Event(ViewEvent::Error(_)) => exit_codes::ERROR_INVALID_EXPRESSION,
        Evaluation::Event(ViewEvent::Restart) => exit_codes::ERROR_FATAL,
        Evaluation::TimedOut => exit_codes::ERROR_TIMEOUT,
        Evaluation::Canceled => exit_codes::ERROR_CANCELED,
    }
}

fn severity(code: i32) -> u8 {
    match code {
        exit_codes::SUCCESS => 0,
        exit_codes::ERROR_INVALID_EXPRESSION => 1,
        exit_codes::ERROR_TIMEOUT => 2,
        exit_codes::ERROR_FATAL => 3,
        exit_codes::ERROR_CONFIG => 4,
        _ => 5,
    }
}

/// The more severe of two exit codes.
pub fn worst(a: i32, b: i32) -> i32 {
    if severity(b) > severity(a) {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&CalcError::Disposed), 130);
        assert_eq!(handle_error(&CalcError::Timeout("5s".into())), 2);
        assert_eq!(handle_error(&CalcError::Panicked("boom".into())), 3);
        assert_eq!(handle_error(&CalcError::Config("bad".into())), 4);
    }

    #[test]
    fn anyhow_downcast() {
        let err = anyhow::Error::new(CalcError::Config("bad".into()));
        assert_eq!(exit_code(&err), exit_codes::ERROR_CONFIG);

        let err = anyhow::anyhow!("disk full");
        assert_eq!(exit_code(&err), exit_codes::ERROR_FATAL);
    }

    #[test]
    fn evaluation_codes() {
        assert_eq!(
            evaluation_code(&Evaluation::Event(ViewEvent::Display("4".into()))),
            0
        );
        assert_eq!(
            evaluation_code(&Evaluation::Event(ViewEvent::Error("x".into()))),
            1
        );
        assert_eq!(evaluation_code(&Evaluation::Event(ViewEvent::Restart)), 3);
        assert_eq!(evaluation_code(&Evaluation::TimedOut), 2);
        assert_eq!(evaluation_code(&Evaluation::Canceled), 130);
    }

    #[test]
    fn worst_prefers_severe() {
        assert_eq!(worst(0, 1), 1);
        assert_eq!(worst(1, 0), 1);
        assert_eq!(worst(2, 1), 2);
        assert_eq!(worst(3, 2), 3);
        assert_eq!(worst(3, 130), 130);
        assert_eq!(worst(0, 0), 0);
    }
}
