//! Orchestration interfaces.

use exprcalc_core::OutcomeModel;

use crate::single::Single;

/// Trait for the view driven by the presenter.
///
/// Methods take `&self`; implementations use interior mutability because
/// results are delivered from scheduler callbacks.
pub trait CalculatorView: Send + Sync {
    /// The expression currently entered by the user.
    fn current_expression(&self) -> String;

    /// Show a computed value.
    fn set_display(&self, text: &str);

    /// Show a handled error message.
    fn show_error(&self, text: &str);

    /// Reset the whole feature after an unexpected failure.
    fn restart_feature(&self);
}

/// A single application operation producing one `T` per call.
pub trait UseCase<T>: Send + Sync {
    /// Describe the work for `input`; it starts on subscription.
    fn execute(&self, input: &str) -> Single<T>;

    /// Abandon every in-flight subscription started through this use-case.
    fn clean(&self);
}

/// Convenience alias for the evaluate use-case as the presenter sees it.
pub type EvaluateUseCase = dyn UseCase<OutcomeModel>;
