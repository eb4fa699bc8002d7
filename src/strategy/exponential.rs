//! Exponential backoff strategy.
//!
//! # Responsibilities
//! - Double the wait on every attempt, starting from `initial`
//! - Cap the wait at `max`
//! - Stop after `max_retries` attempts (unless unbounded)
//!
//! # Design Decisions
//! - Once the ceiling is hit a latch is set and the power is never computed again
//! - The power is computed in `u128` nanoseconds; only a value above `max`
//!   or a real overflow counts as hitting the ceiling

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::strategy::{within_limit, Outcome, Strategy, StrategyError};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Doubling wait capped at a ceiling.
#[derive(Debug)]
pub struct ExponentialBackoff {
    initial: Duration,
    max: Duration,
    max_retries: u32,
    attempts: AtomicU64,
    ceiling_reached: AtomicBool,
}

impl ExponentialBackoff {
    /// Create an exponential backoff strategy.
    ///
    /// `initial` must be non-zero and not above `max`. `max_retries == 0`
    /// retries forever.
    pub fn new(initial: Duration, max: Duration, max_retries: u32) -> Result<Self, StrategyError> {
        if initial.is_zero() {
            return Err(StrategyError::invalid("initial_interval", "must be greater than zero"));
        }
        if initial > max {
            return Err(StrategyError::invalid(
                "initial_interval",
                format!("{:?} exceeds max_interval {:?}", initial, max),
            ));
        }
        Ok(Self {
            initial,
            max,
            max_retries,
            attempts: AtomicU64::new(0),
            ceiling_reached: AtomicBool::new(false),
        })
    }

    pub fn initial_interval(&self) -> Duration {
        self.initial
    }

    pub fn max_interval(&self) -> Duration {
        self.max
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Number of times `advance` has been called.
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::Relaxed)
    }

    /// True once the computed interval has reached the ceiling.
    pub fn ceiling_reached(&self) -> bool {
        self.ceiling_reached.load(Ordering::Acquire)
    }

    /// `initial × 2^(attempt-1)`, or `None` once it would exceed `max`.
    fn scaled(&self, attempt: u64) -> Option<Duration> {
        let exponent = u32::try_from(attempt.saturating_sub(1)).ok()?;
        let factor = 1u128.checked_shl(exponent)?;
        let nanos = self.initial.as_nanos().checked_mul(factor)?;
        if nanos > self.max.as_nanos() {
            return None;
        }
        let secs = u64::try_from(nanos / NANOS_PER_SEC).ok()?;
        Some(Duration::new(secs, (nanos % NANOS_PER_SEC) as u32))
    }
}

impl Strategy for ExponentialBackoff {
    fn advance(&self) -> Option<Duration> {
        let attempt = self.attempts.fetch_add(1, Ordering::AcqRel) + 1;
        if !within_limit(attempt, self.max_retries) {
            return None;
        }

        if self.ceiling_reached.load(Ordering::Acquire) {
            return Some(self.max);
        }

        match self.scaled(attempt) {
            Some(wait) => Some(wait),
            None => {
                self.ceiling_reached.store(true, Ordering::Release);
                Some(self.max)
            }
        }
    }

    fn report(&self, _outcome: Outcome) -> &dyn Strategy {
        self
    }
}
