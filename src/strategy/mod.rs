//! Retry strategies.
//!
//! # Data Flow
//! ```text
//! Operation fails
//!     → executor calls Strategy::advance()
//!         - fixed.rs (constant wait)
//!         - exponential.rs (doubling wait, capped)
//!         - adaptive.rs (failure window gate → base strategy)
//!     → Some(wait): sleep, then retry
//!     → None: attempts exhausted
//!
//! Every attempt (optionally):
//!     → Strategy::report(outcome) feeds adaptive windows
//! ```
//!
//! # Design Decisions
//! - Strategies own their counters as atomics; no process-wide state
//! - Parameters are validated once, in the constructor
//! - `thread_safe.rs` serializes strategies whose compound decisions must not interleave

pub mod adaptive;
pub mod exponential;
pub mod fixed;
pub mod thread_safe;
pub mod window;

use std::sync::Arc;
use std::time::Duration;

pub use adaptive::AdaptiveTimeout;
pub use exponential::ExponentialBackoff;
pub use fixed::FixedInterval;
pub use thread_safe::ThreadSafe;
pub use window::FailureWindow;

/// `max_retries` value meaning "retry forever".
pub const UNBOUNDED: u32 = 0;

/// Result of a single attempt, as fed back to a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn is_failure(self) -> bool {
        matches!(self, Outcome::Failure)
    }
}

impl<T, E> From<&Result<T, E>> for Outcome {
    fn from(result: &Result<T, E>) -> Self {
        if result.is_ok() {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

/// Error raised when a strategy is constructed with invalid parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrategyError {
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl StrategyError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        StrategyError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// A policy deciding how long to wait between attempts and when to stop.
pub trait Strategy: Send + Sync {
    /// Called once per failed attempt.
    ///
    /// Returns the wait before the next attempt, or `None` when the caller
    /// must stop retrying.
    fn advance(&self) -> Option<Duration>;

    /// Feed back the outcome of an attempt.
    ///
    /// Returns the strategy to use from now on. The built-in strategies
    /// return `self`, and the `&S`/`Box`/`Arc` impls pass the inner answer
    /// through unchanged.
    ///
    /// The wrappers [`AdaptiveTimeout`] and [`ThreadSafe`] forward the outcome
    /// to the strategy they wrap but always return themselves. A replacement
    /// returned by the wrapped strategy is not adopted; wrap the replacement
    /// directly if it must sit behind the gate or the lock.
    fn report(&self, outcome: Outcome) -> &dyn Strategy;
}

impl<S: Strategy + ?Sized> Strategy for &S {
    fn advance(&self) -> Option<Duration> {
        (**self).advance()
    }

    fn report(&self, outcome: Outcome) -> &dyn Strategy {
        (**self).report(outcome)
    }
}

impl<S: Strategy + ?Sized> Strategy for Box<S> {
    fn advance(&self) -> Option<Duration> {
        (**self).advance()
    }

    fn report(&self, outcome: Outcome) -> &dyn Strategy {
        (**self).report(outcome)
    }
}

impl<S: Strategy + ?Sized> Strategy for Arc<S> {
    fn advance(&self) -> Option<Duration> {
        (**self).advance()
    }

    fn report(&self, outcome: Outcome) -> &dyn Strategy {
        (**self).report(outcome)
    }
}

/// Checks an attempt counter against a configured maximum.
pub(crate) fn within_limit(attempt: u64, max_retries: u32) -> bool {
    max_retries == UNBOUNDED || attempt <= u64::from(max_retries)
}
