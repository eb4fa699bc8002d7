//! Retry metrics.
//!
//! # Metrics
//! - `retry_attempts_total` (counter): operation invocations
//! - `retry_success_total` (counter): runs that ended in success
//! - `retry_exhausted_total` (counter): runs the strategy gave up on
//! - `retry_cancelled_total` (counter): runs aborted by their cancel signal
//! - `retry_attempts_per_success` (histogram): attempts needed by successful runs
//! - `retry_wait_seconds` (histogram): scheduled waits between attempts

use std::time::Duration;

pub fn record_attempt() {
    ::metrics::counter!("retry_attempts_total").increment(1);
}

pub fn record_success(attempts: u64) {
    ::metrics::counter!("retry_success_total").increment(1);
    ::metrics::histogram!("retry_attempts_per_success").record(attempts as f64);
}

pub fn record_exhausted() {
    ::metrics::counter!("retry_exhausted_total").increment(1);
}

pub fn record_cancelled() {
    ::metrics::counter!("retry_cancelled_total").increment(1);
}

pub fn record_wait(wait: Duration) {
    ::metrics::histogram!("retry_wait_seconds").record(wait.as_secs_f64());
}
