//! # exprcalc-orchestration
//!
//! Execution contexts, single-shot results, the evaluate use-case, and the
//! presenter that binds it to a view.

pub mod disposable;
pub mod interfaces;
pub mod presenter;
pub mod scheduler;
pub mod single;
pub mod usecase;

pub use disposable::{CompositeDisposable, Disposable};
pub use interfaces::{CalculatorView, EvaluateUseCase, UseCase};
pub use presenter::CalculatorPresenter;
pub use scheduler::{
    AppSchedulers, ImmediateScheduler, ImmediateSchedulers, MainLoopScheduler, PoolScheduler,
    Scheduler, SchedulerProvider, Task,
};
pub use single::{Emitter, Single};
pub use usecase::EvaluateExpression;
