//! Adaptive failure gate over a base strategy.
//!
//! # Responsibilities
//! - Track the outcome of the most recent requests in a [`FailureWindow`]
//! - Refuse retries while the failure count is at or above the threshold
//! - Otherwise defer to the base strategy unchanged
//!
//! # Design Decisions
//! - The gate recovers on its own once failures age out of the window
//! - Scan-then-delegate is not transactional; concurrent reports may land in
//!   between. Wrap in [`ThreadSafe`](crate::strategy::ThreadSafe) when that matters.

use std::time::Duration;

use crate::strategy::{FailureWindow, Outcome, Strategy, StrategyError};

/// Gates a base strategy on the recent failure count.
#[derive(Debug)]
pub struct AdaptiveTimeout<S> {
    base: S,
    window: FailureWindow,
    threshold: u32,
}

impl<S: Strategy> AdaptiveTimeout<S> {
    /// Wrap `base` with a window of `window_words × 64` outcomes.
    ///
    /// Retries are refused once `failure_threshold` failures sit in the window.
    pub fn new(base: S, window_words: usize, failure_threshold: u32) -> Result<Self, StrategyError> {
        if failure_threshold == 0 {
            return Err(StrategyError::invalid(
                "failure_threshold",
                "must be greater than zero",
            ));
        }
        Ok(Self {
            base,
            window: FailureWindow::new(window_words)?,
            threshold: failure_threshold,
        })
    }

    pub fn base(&self) -> &S {
        &self.base
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn capacity(&self) -> u64 {
        self.window.capacity()
    }

    /// Failures currently recorded in the window.
    pub fn failures(&self) -> u64 {
        self.window.failures()
    }

    /// True while retries are being refused.
    pub fn is_open(&self) -> bool {
        self.failures() >= u64::from(self.threshold)
    }
}

impl<S: Strategy> Strategy for AdaptiveTimeout<S> {
    fn advance(&self) -> Option<Duration> {
        let failures = self.window.failures();
        if failures >= u64::from(self.threshold) {
            tracing::debug!(
                failures,
                threshold = self.threshold,
                capacity = self.window.capacity(),
                "Failure threshold reached, refusing retry"
            );
            return None;
        }
        self.base.advance()
    }

    fn report(&self, outcome: Outcome) -> &dyn Strategy {
        self.window.record(outcome);
        self.base.report(outcome);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::FixedInterval;

    fn fixed(max_retries: u32) -> FixedInterval {
        FixedInterval::new(Duration::from_millis(10), max_retries).unwrap()
    }

    #[test]
    fn test_rejects_invalid_sizes() {
        assert!(AdaptiveTimeout::new(fixed(0), 0, 5).is_err());
        assert!(AdaptiveTimeout::new(fixed(0), 1, 0).is_err());
    }

    #[test]
    fn test_delegates_below_threshold() {
        let strategy = AdaptiveTimeout::new(fixed(2), 1, 3).unwrap();
        strategy.report(Outcome::Failure);
        strategy.report(Outcome::Failure);
        assert_eq!(strategy.advance(), Some(Duration::from_millis(10)));
        assert_eq!(strategy.advance(), Some(Duration::from_millis(10)));
        // base strategy is exhausted on its own
        assert_eq!(strategy.advance(), None);
    }

    #[test]
    fn test_gate_opens_and_recovers() {
        let strategy = AdaptiveTimeout::new(fixed(0), 1, 3).unwrap();
        for _ in 0..3 {
            strategy.report(Outcome::Failure);
        }
        assert!(strategy.is_open());
        assert_eq!(strategy.advance(), None);
        // gate does not consume base attempts
        assert_eq!(strategy.base().attempts(), 0);

        // successes only clear their own slots; failures must age out
        for _ in 0..61 {
            strategy.report(Outcome::Success);
        }
        assert_eq!(strategy.advance(), None);

        strategy.report(Outcome::Success);
        assert_eq!(strategy.failures(), 2);
        assert!(!strategy.is_open());
        assert_eq!(strategy.advance(), Some(Duration::from_millis(10)));
    }

    #[test]
    fn test_nested_windows_all_see_reports() {
        let inner = AdaptiveTimeout::new(fixed(0), 1, 100).unwrap();
        let outer = AdaptiveTimeout::new(inner, 1, 100).unwrap();
        outer.report(Outcome::Failure);
        assert_eq!(outer.failures(), 1);
        assert_eq!(outer.base().failures(), 1);
    }
}
