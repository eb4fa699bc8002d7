//! Mutual exclusion decorator for strategies.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::strategy::{Outcome, Strategy};

/// Serializes every call into the wrapped strategy behind one lock.
///
/// `advance` and `report` are each atomic with respect to one another, which
/// makes compound decisions (such as the adaptive scan-then-delegate) exact
/// under concurrent use.
#[derive(Debug)]
pub struct ThreadSafe<S> {
    inner: Mutex<S>,
}

impl<S: Strategy> ThreadSafe<S> {
    pub fn new(strategy: S) -> Self {
        Self {
            inner: Mutex::new(strategy),
        }
    }

    /// Unwrap the decorated strategy.
    pub fn into_inner(self) -> S {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // Strategies keep no invariants that a panicking caller could break
    // halfway, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Strategy> Strategy for ThreadSafe<S> {
    fn advance(&self) -> Option<Duration> {
        self.lock().advance()
    }

    fn report(&self, outcome: Outcome) -> &dyn Strategy {
        self.lock().report(outcome);
        self
    }
}
