//! Lazy, cancellable, single-value producers.
//!
//! A [`Single`] describes work that yields exactly one value or one
//! [`CalcError`]. Nothing runs until [`Single::subscribe`]; the returned
//! [`Disposable`] abandons the work if it has not finished.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use parking_lot::Mutex;
use tracing::{trace, warn};

use exprcalc_core::{CalcError, CancellationToken};

use crate::disposable::Disposable;
use crate::scheduler::Scheduler;

type Callback<T> = Box<dyn FnOnce(Result<T, CalcError>) + Send>;
type Source<T> = Box<dyn FnOnce(Emitter<T>) + Send>;

/// Receiving end handed to a producer; delivers at most one result.
pub struct Emitter<T> {
    callback: Callback<T>,
    token: CancellationToken,
}

impl<T> Emitter<T> {
    fn new(token: CancellationToken, callback: Callback<T>) -> Self {
        Self { callback, token }
    }

    /// Whether the subscriber has lost interest.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Deliver the result, unless the subscriber was disposed.
    pub fn emit(self, result: Result<T, CalcError>) {
        if self.token.is_cancelled() {
            trace!("result dropped, subscriber disposed");
            return;
        }
        (self.callback)(result);
    }
}

/// A lazy producer of one `T` or one [`CalcError`].
pub struct Single<T> {
    source: Source<T>,
}

impl<T: Send + 'static> Single<T> {
    /// Wrap a producer that is handed an [`Emitter`] on subscription.
    pub fn create<F>(source: F) -> Self
    where
        F: FnOnce(Emitter<T>) + Send + 'static,
    {
        Self {
            source: Box::new(source),
        }
    }

    pub fn just(value: T) -> Self {
        Self::create(move |emitter| emitter.emit(Ok(value)))
    }

    pub fn error(err: CalcError) -> Self {
        Self::create(move |emitter| emitter.emit(Err(err)))
    }

    /// Run `f` on subscription. A panic in `f` becomes [`CalcError::Panicked`].
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T, CalcError> + Send + 'static,
    {
        Self::create(move |emitter| {
            if let Err(err) = emitter.token.check_cancelled() {
                trace!(error = %err, "work skipped");
                return;
            }
            let result = panic::catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|payload| {
                let err = CalcError::from_panic(payload.as_ref());
                warn!(error = %err, "producer panicked");
                Err(err)
            });
            emitter.emit(result);
        })
    }

    /// Perform the subscription, and therefore the work, on `scheduler`.
    #[must_use]
    pub fn subscribe_on(self, scheduler: Arc<dyn Scheduler>) -> Self {
        let source = self.source;
        Self::create(move |emitter| {
            trace!(scheduler = scheduler.name(), "subscribing");
            scheduler.schedule(Box::new(move || {
                if emitter.is_disposed() {
                    trace!("subscription skipped, subscriber disposed");
                    return;
                }
                source(emitter);
            }));
        })
    }

    /// Deliver the result on `scheduler`.
    #[must_use]
    pub fn observe_on(self, scheduler: Arc<dyn Scheduler>) -> Self {
        let source = self.source;
        Self::create(move |emitter: Emitter<T>| {
            let token = emitter.token.clone();
            source(Emitter::new(
                token,
                Box::new(move |result| {
                    trace!(scheduler = scheduler.name(), "delivering");
                    scheduler.schedule(Box::new(move || emitter.emit(result)));
                }),
            ));
        })
    }

    /// Call `hook` with the subscription handle before the work starts.
    #[must_use]
    pub fn on_subscribe<H>(self, hook: H) -> Self
    where
        H: FnOnce(Disposable) + Send + 'static,
    {
        let source = self.source;
        Self::create(move |emitter: Emitter<T>| {
            hook(Disposable::new(emitter.token.clone()));
            source(emitter);
        })
    }

    /// Wait for both producers, then combine their values with `merge`.
    ///
    /// The first error wins; the other branch is then cancelled if it has
    /// not started and its result is discarded if it has.
    pub fn zip<A, B, F>(left: Single<A>, right: Single<B>, merge: F) -> Self
    where
        A: Send + 'static,
        B: Send + 'static,
        F: FnOnce(A, B) -> T + Send + 'static,
    {
        Self::create(move |emitter: Emitter<T>| {
            let branches = emitter.token.child();
            let join = Arc::new(Mutex::new(Join {
                left: None,
                right: None,
                merge: Some(merge),
                downstream: Some(emitter),
                branches: branches.clone(),
            }));

            let on_left = Arc::clone(&join);
            (left.source)(Emitter::new(
                branches.clone(),
                Box::new(move |result| Join::on_left(&on_left, result)),
            ));

            let on_right = join;
            (right.source)(Emitter::new(
                branches,
                Box::new(move |result| Join::on_right(&on_right, result)),
            ));
        })
    }

    /// Start the work and hand the result to `on_result`.
    pub fn subscribe<F>(self, on_result: F) -> Disposable
    where
        F: FnOnce(Result<T, CalcError>) + Send + 'static,
    {
        let token = CancellationToken::new();
        let finished = token.clone();
        let emitter = Emitter::new(
            token.clone(),
            Box::new(move |result| {
                finished.cancel();
                on_result(result);
            }),
        );
        (self.source)(emitter);
        Disposable::new(token)
    }

    /// Subscribe and block the calling thread until the result arrives.
    ///
    /// Must not be called on a thread that is expected to drain a scheduler
    /// this producer delivers on.
    pub fn blocking_get(self) -> Result<T, CalcError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let _subscription = self.subscribe(move |result| {
            let _ = tx.send(result);
        });
        rx.recv().unwrap_or(Err(CalcError::Disposed))
    }

    /// Like [`blocking_get`](Self::blocking_get), disposing the work after `timeout`.
    pub fn blocking_get_timeout(self, timeout: Duration) -> Result<T, CalcError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let subscription = self.subscribe(move |result| {
            let _ = tx.send(result);
        });
        match rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(RecvTimeoutError::Timeout) => {
                subscription.dispose();
                Err(CalcError::Timeout(format!("{timeout:?}")))
            }
            Err(RecvTimeoutError::Disconnected) => Err(CalcError::Disposed),
        }
    }
}

/// Barrier state shared by the two branches of a zip.
struct Join<A, B, T, F> {
    left: Option<A>,
    right: Option<B>,
    merge: Option<F>,
    downstream: Option<Emitter<T>>,
    branches: CancellationToken,
}

enum Settled<A, B, T, F> {
    Pending,
    Both(Emitter<T>, F, A, B),
    Failed(Emitter<T>, CalcError),
}

impl<A, B, T, F> Join<A, B, T, F>
where
    F: FnOnce(A, B) -> T,
{
    fn on_left(join: &Mutex<Self>, result: Result<A, CalcError>) {
        let settled = {
            let mut state = join.lock();
            match result {
                Ok(value) => {
                    state.left = Some(value);
                    state.take_both()
                }
                Err(err) => state.take_failure(err),
            }
        };
        settled.deliver();
    }

    fn on_right(join: &Mutex<Self>, result: Result<B, CalcError>) {
        let settled = {
            let mut state = join.lock();
            match result {
                Ok(value) => {
                    state.right = Some(value);
                    state.take_both()
                }
                Err(err) => state.take_failure(err),
            }
        };
        settled.deliver();
    }

    fn take_both(&mut self) -> Settled<A, B, T, F> {
        if self.left.is_none() || self.right.is_none() {
            return Settled::Pending;
        }
        match (
            self.downstream.take(),
            self.merge.take(),
            self.left.take(),
            self.right.take(),
        ) {
            (Some(downstream), Some(merge), Some(left), Some(right)) => {
                Settled::Both(downstream, merge, left, right)
            }
            _ => Settled::Pending,
        }
    }

    fn take_failure(&mut self, err: CalcError) -> Settled<A, B, T, F> {
        self.branches.cancel();
        self.merge = None;
        match self.downstream.take() {
            Some(downstream) => Settled::Failed(downstream, err),
            None => Settled::Pending,
        }
    }
}

impl<A, B, T, F> Settled<A, B, T, F>
where
    F: FnOnce(A, B) -> T,
{
    fn deliver(self) {
        match self {
            Self::Pending => {}
            Self::Both(downstream, merge, left, right) => {
                let merged = panic::catch_unwind(AssertUnwindSafe(|| merge(left, right)))
                    .map_err(|payload| CalcError::from_panic(payload.as_ref()));
                downstream.emit(merged);
            }
            Self::Failed(downstream, err) => downstream.emit(Err(err)),
        }
    }
}
