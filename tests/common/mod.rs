//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

/// An operation that fails a fixed number of times before succeeding.
#[derive(Debug)]
pub struct FlakyOperation {
    calls: AtomicU32,
    failures_before_success: u32,
    latency: Duration,
    completed: AtomicBool,
}

impl FlakyOperation {
    pub fn new(failures_before_success: u32) -> Self {
        Self {
            calls: AtomicU32::new(0),
            failures_before_success,
            latency: Duration::ZERO,
            completed: AtomicBool::new(false),
        }
    }

    /// Never succeeds.
    pub fn always_failing() -> Self {
        Self::new(u32::MAX)
    }

    /// Each call takes `latency` before returning.
    #[allow(dead_code)]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    /// True once at least one call ran to completion.
    #[allow(dead_code)]
    pub fn completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    pub async fn call(&self) -> Result<u32, String> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.completed.store(true, Ordering::SeqCst);
        if n > self.failures_before_success {
            Ok(n)
        } else {
            Err(format!("attempt {} failed", n))
        }
    }
}
