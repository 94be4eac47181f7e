//! Cooperative cancellation of long joins.

use crate::error::{Result, SimilarityError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A shared flag that stops a running join.
///
/// Clones share the same flag, so one clone can be handed to the join while
/// another is kept to trigger cancellation from a different thread.
///
/// ```
/// use linesim::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called on any clone.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Cancellation and deadline checked before each pair.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Budget<'a> {
    cancel: Option<&'a CancelToken>,
    deadline: Option<Instant>,
}

impl<'a> Budget<'a> {
    pub(crate) fn new(cancel: Option<&'a CancelToken>, deadline: Option<Instant>) -> Self {
        Self { cancel, deadline }
    }

    pub(crate) fn check(&self) -> Result<()> {
        if self.cancel.is_some_and(CancelToken::is_cancelled) {
            return Err(SimilarityError::Cancelled);
        }
        if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(SimilarityError::DeadlineExceeded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_unbounded_budget() {
        assert!(Budget::default().check().is_ok());
    }

    #[test]
    fn test_cancelled_budget() {
        let token = CancelToken::new();
        let budget = Budget::new(Some(&token), None);
        assert!(budget.check().is_ok());

        token.clone().cancel();
        assert_eq!(budget.check(), Err(SimilarityError::Cancelled));
    }

    #[test]
    fn test_deadline_budget() {
        let past = Instant::now();
        assert_eq!(
            Budget::new(None, Some(past)).check(),
            Err(SimilarityError::DeadlineExceeded)
        );

        let future = Instant::now() + Duration::from_secs(3600);
        assert!(Budget::new(None, Some(future)).check().is_ok());
    }
}
