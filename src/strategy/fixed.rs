//! Fixed interval strategy.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::strategy::{within_limit, Outcome, Strategy, StrategyError};

/// Waits the same interval before every retry.
#[derive(Debug)]
pub struct FixedInterval {
    interval: Duration,
    max_retries: u32,
    attempts: AtomicU64,
}

impl FixedInterval {
    /// Create a fixed interval strategy.
    ///
    /// `max_retries == 0` retries forever.
    pub fn new(interval: Duration, max_retries: u32) -> Result<Self, StrategyError> {
        if interval.is_zero() {
            return Err(StrategyError::invalid("interval", "must be greater than zero"));
        }
        Ok(Self {
            interval,
            max_retries,
            attempts: AtomicU64::new(0),
        })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Number of times `advance` has been called.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }
}

impl Strategy for FixedInterval {
    fn advance(&self) -> Option<Duration> {
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        within_limit(attempt, self.max_retries).then_some(self.interval)
    }

    fn report(&self, _outcome: Outcome) -> &dyn Strategy {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_interval() {
        let err = FixedInterval::new(Duration::ZERO, 3).unwrap_err();
        assert!(matches!(err, StrategyError::InvalidParameter { name: "interval", .. }));
    }

    #[test]
    fn test_bounded_retries() {
        let interval = Duration::from_millis(250);
        let strategy = FixedInterval::new(interval, 3).unwrap();

        for _ in 0..3 {
            assert_eq!(strategy.advance(), Some(interval));
        }
        for _ in 0..5 {
            assert_eq!(strategy.advance(), None);
        }
        // counter keeps moving after exhaustion
        assert_eq!(strategy.attempts(), 8);
    }

    #[test]
    fn test_unbounded_retries() {
        let interval = Duration::from_millis(10);
        let strategy = FixedInterval::new(interval, 0).unwrap();
        for _ in 0..1_000 {
            assert_eq!(strategy.advance(), Some(interval));
        }
    }

    #[test]
    fn test_report_is_noop() {
        let strategy = FixedInterval::new(Duration::from_millis(1), 1).unwrap();
        let same = strategy.report(Outcome::Failure);
        assert_eq!(same.advance(), Some(Duration::from_millis(1)));
        assert_eq!(strategy.advance(), None);
    }
}
