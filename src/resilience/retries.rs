//! Retry execution loop.
//!
//! # Responsibilities
//! - Run the operation until it succeeds
//! - Ask the strategy for the next wait after every failure
//! - Wait on a single reusable timer, aborting if the cancel signal fires
//! - Optionally report every attempt's outcome back to the strategy
//!
//! # Design Decisions
//! - An in-flight operation is never interrupted; cancellation is only
//!   observed while waiting between attempts
//! - Operation errors are opaque: only their failure is observed, they are
//!   never logged, wrapped or returned
//! - Outcome reporting is opt-in (`Executor::reporting`)

use std::future::Future;

use tokio::time::Instant;

use crate::config::ExecutorConfig;
use crate::lifecycle::{CancelReason, CancelSignal};
use crate::observability::metrics;
use crate::strategy::{Outcome, Strategy};

/// Terminal errors of a retry run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RetryError {
    /// The strategy refused another attempt.
    #[error("retry attempts exhausted after {attempts} attempts")]
    AttemptsExhausted { attempts: u64 },

    /// The cancel signal fired while waiting.
    #[error(transparent)]
    Cancelled(#[from] CancelReason),
}

/// Drives an operation through a [`Strategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor {
    report_outcomes: bool,
}

impl Executor {
    /// An executor that never calls [`Strategy::report`].
    pub fn new() -> Self {
        Self::default()
    }

    /// An executor that reports every attempt's outcome to the strategy.
    pub fn reporting() -> Self {
        Self {
            report_outcomes: true,
        }
    }

    pub fn from_config(config: &ExecutorConfig) -> Self {
        Self {
            report_outcomes: config.report_outcomes,
        }
    }

    pub fn reports_outcomes(&self) -> bool {
        self.report_outcomes
    }

    /// Run `operation` until it succeeds, the strategy gives up, or `cancel` fires.
    pub async fn run<F, Fut, T, E>(
        &self,
        cancel: &CancelSignal,
        strategy: &dyn Strategy,
        mut operation: F,
    ) -> Result<T, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut strategy = strategy;
        let timer = tokio::time::sleep_until(Instant::now());
        tokio::pin!(timer);
        let mut attempts: u64 = 0;

        loop {
            attempts += 1;
            metrics::record_attempt();

            let result = operation().await;
            if self.report_outcomes {
                strategy = strategy.report(Outcome::from(&result));
            }

            if let Ok(value) = result {
                metrics::record_success(attempts);
                return Ok(value);
            }

            let Some(wait) = strategy.advance() else {
                tracing::warn!(attempts, "Retry attempts exhausted");
                metrics::record_exhausted();
                return Err(RetryError::AttemptsExhausted { attempts });
            };

            tracing::debug!(attempt = attempts, delay = ?wait, "Attempt failed, retrying");
            metrics::record_wait(wait);
            timer.as_mut().reset(Instant::now() + wait);

            tokio::select! {
                biased;
                reason = cancel.cancelled() => {
                    tracing::info!(attempts, reason = %reason, "Retry cancelled while waiting");
                    metrics::record_cancelled();
                    return Err(RetryError::Cancelled(reason));
                }
                _ = &mut timer => {}
            }
        }
    }
}

/// Run `operation` with a non-reporting [`Executor`].
pub async fn execute<F, Fut, T, E>(
    cancel: &CancelSignal,
    strategy: &dyn Strategy,
    operation: F,
) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    Executor::new().run(cancel, strategy, operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{AdaptiveTimeout, ExponentialBackoff, FixedInterval};
    use std::cell::Cell;
    use std::time::Duration;

    fn fixed(ms: u64, max_retries: u32) -> FixedInterval {
        FixedInterval::new(Duration::from_millis(ms), max_retries).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_success() {
        let calls = Cell::new(0);
        let strategy = fixed(100, 3);
        let result = execute(&CancelSignal::new(), &strategy, || {
            calls.set(calls.get() + 1);
            async { Ok::<_, String>("done") }
        })
        .await;

        assert_eq!(result, Ok("done"));
        assert_eq!(calls.get(), 1);
        assert_eq!(strategy.attempts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_counts_initial_attempt() {
        let calls = Cell::new(0);
        let strategy = fixed(10, 4);
        let result = execute(&CancelSignal::new(), &strategy, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>("unavailable") }
        })
        .await;

        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 5 }));
        assert_eq!(calls.get(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unit_error_type() {
        let calls = Cell::new(0);
        let strategy = fixed(10, 2);
        let result = execute(&CancelSignal::new(), &strategy, || {
            calls.set(calls.get() + 1);
            async { Err::<(), ()>(()) }
        })
        .await;

        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 3 }));
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_follow_strategy() {
        let strategy =
            ExponentialBackoff::new(Duration::from_millis(100), Duration::from_millis(300), 3)
                .unwrap();
        let start = Instant::now();
        let result = execute(&CancelSignal::new(), &strategy, || async {
            Err::<(), _>("unavailable")
        })
        .await;

        assert!(matches!(result, Err(RetryError::AttemptsExhausted { attempts: 4 })));
        // 100 + 200 + 300
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(600), "elapsed {:?}", elapsed);
        assert!(elapsed < Duration::from_millis(650), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_failures() {
        let calls = Cell::new(0);
        let strategy = fixed(10, 5);
        let result = execute(&CancelSignal::new(), &strategy, || {
            let n = calls.get() + 1;
            calls.set(n);
            async move {
                if n < 3 {
                    Err("flaky")
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(strategy.attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_wait() {
        let cancel = CancelSignal::with_timeout(Duration::from_millis(50));
        let strategy = fixed(10_000, 0);
        let start = Instant::now();
        let result = execute(&cancel, &strategy, || async { Err::<(), _>("down") }).await;

        assert_eq!(result, Err(RetryError::Cancelled(CancelReason::DeadlineExceeded)));
        let elapsed = start.elapsed();
        assert!(elapsed < Duration::from_millis(100), "elapsed {:?}", elapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reporting_executor_feeds_window() {
        let strategy = AdaptiveTimeout::new(fixed(10, 0), 1, 3).unwrap();
        let result = Executor::reporting()
            .run(&CancelSignal::new(), &strategy, || async { Err::<(), _>("down") })
            .await;

        // three reported failures open the gate on the third advance
        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 3 }));
        assert_eq!(strategy.failures(), 3);
        assert_eq!(strategy.base().attempts(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_executor_does_not_report() {
        let strategy = AdaptiveTimeout::new(fixed(10, 3), 1, 1).unwrap();
        let result = execute(&CancelSignal::new(), &strategy, || async { Err::<(), _>("down") }).await;

        assert_eq!(result, Err(RetryError::AttemptsExhausted { attempts: 4 }));
        assert_eq!(strategy.failures(), 0);
    }
}
