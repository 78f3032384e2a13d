//! Handles for abandoning in-flight work.

use parking_lot::Mutex;
use tracing::trace;

use exprcalc_core::CancellationToken;

/// Handle to one subscription.
///
/// Disposing stops work that has not started yet and suppresses delivery.
/// A subscription also reports disposed once its result has been delivered.
#[derive(Debug, Clone)]
pub struct Disposable {
    token: CancellationToken,
}

impl Disposable {
    #[must_use]
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    /// A handle that is already disposed.
    #[must_use]
    pub fn disposed() -> Self {
        let token = CancellationToken::new();
        token.cancel();
        Self { token }
    }

    pub fn dispose(&self) {
        self.token.cancel();
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// A set of subscriptions disposed together.
#[derive(Debug, Default)]
pub struct CompositeDisposable {
    items: Mutex<Vec<Disposable>>,
}

impl CompositeDisposable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `disposable`, dropping entries that already finished.
    pub fn add(&self, disposable: Disposable) {
        let mut items = self.items.lock();
        items.retain(|d| !d.is_disposed());
        items.push(disposable);
    }

    /// Dispose every tracked subscription. Returns how many were still live.
    pub fn dispose(&self) -> usize {
        let drained: Vec<Disposable> = self.items.lock().drain(..).collect();
        let live = drained.iter().filter(|d| !d.is_disposed()).count();
        for d in &drained {
            d.dispose();
        }
        trace!(live, total = drained.len(), "composite disposed");
        live
    }

    /// Number of tracked subscriptions, finished ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}
