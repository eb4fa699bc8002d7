//! Cancellation signal for retry loops.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Why a signal fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CancelReason {
    #[error("operation cancelled")]
    Cancelled,
    #[error("deadline exceeded")]
    DeadlineExceeded,
}

/// A cloneable cancellation signal with an optional deadline.
///
/// Clones share state: cancelling one cancels all of them.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that only fires on [`cancel`](Self::cancel).
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that fires `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// A signal that fires at `deadline`.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Fire the signal.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// A signal that fires when this one does, or when cancelled on its own.
    ///
    /// The child inherits the parent's deadline.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
            deadline: self.deadline,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Non-blocking check.
    pub fn error(&self) -> Option<CancelReason> {
        if self.token.is_cancelled() {
            Some(CancelReason::Cancelled)
        } else if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            Some(CancelReason::DeadlineExceeded)
        } else {
            None
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.error().is_some()
    }

    /// Resolves once the signal fires.
    pub async fn cancelled(&self) -> CancelReason {
        match self.deadline {
            Some(deadline) => tokio::select! {
                biased;
                _ = self.token.cancelled() => CancelReason::Cancelled,
                _ = tokio::time::sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => {
                self.token.cancelled().await;
                CancelReason::Cancelled
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_cancel() {
        let signal = CancelSignal::new();
        assert_eq!(signal.error(), None);

        let clone = signal.clone();
        clone.cancel();
        assert_eq!(signal.error(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn test_child_follows_parent() {
        let parent = CancelSignal::new();
        let child = parent.child();
        child.cancel();
        assert!(!parent.is_cancelled());

        let child = parent.child();
        parent.cancel();
        assert!(child.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_fires() {
        let signal = CancelSignal::with_timeout(Duration::from_millis(50));
        assert_eq!(signal.error(), None);

        let start = Instant::now();
        assert_eq!(signal.cancelled().await, CancelReason::DeadlineExceeded);
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(50) && elapsed < Duration::from_millis(60));
        assert_eq!(signal.error(), Some(CancelReason::DeadlineExceeded));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_beats_deadline() {
        let signal = CancelSignal::with_timeout(Duration::from_secs(60));
        let trigger = signal.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });
        assert_eq!(signal.cancelled().await, CancelReason::Cancelled);
    }
}
