//! Cooperative cancellation shared between a subscriber and in-flight work.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::calculator::CalcError;

/// Cooperative cancellation token using an atomic flag.
///
/// Clones share the same flag. A [`child`](Self::child) token is cancelled
/// when either itself or any ancestor is cancelled, while cancelling the
/// child leaves the parent untouched.
///
/// # Example
/// ```
/// use exprcalc_core::cancel::CancellationToken;
///
/// let token = CancellationToken::new();
/// let child = token.child();
/// assert!(!child.is_cancelled());
///
/// token.cancel();
/// assert!(child.is_cancelled());
/// assert!(token.check_cancelled().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
    parent: Option<Arc<CancellationToken>>,
}

impl CancellationToken {
    /// Create a new, independent token.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: None,
        }
    }

    /// Create a token that also observes this token's cancellation.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            parent: Some(Arc::new(self.clone())),
        }
    }

    /// Check if cancellation has been requested here or on an ancestor.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
            || self.parent.as_ref().is_some_and(|p| p.is_cancelled())
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Check for cancellation, returning an error if cancelled.
    pub fn check_cancelled(&self) -> Result<(), CalcError> {
        if self.is_cancelled() {
            Err(CalcError::Disposed)
        } else {
            Ok(())
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_token_is_live() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check_cancelled().is_ok());
    }

    #[test]
    fn clones_share_state() {
        let token = CancellationToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn parent_cancels_child() {
        let parent = CancellationToken::new();
        let child = parent.child();
        let grandchild = child.child();
        parent.cancel();
        assert!(child.is_cancelled());
        assert!(grandchild.is_cancelled());
    }

    #[test]
    fn child_does_not_cancel_parent() {
        let parent = CancellationToken::new();
        let child = parent.child();
        child.cancel();
        assert!(child.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn check_cancelled_reports_disposed() {
        let token = CancellationToken::new();
        token.cancel();
        assert!(matches!(token.check_cancelled(), Err(CalcError::Disposed)));
    }

    #[test]
    fn token_across_threads() {
        let token = CancellationToken::new();
        let remote = token.clone();
        std::thread::spawn(move || remote.cancel()).join().unwrap();
        assert!(token.is_cancelled());
    }
}
