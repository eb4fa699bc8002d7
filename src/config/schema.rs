//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for a retry
//! policy. All types derive Serde traits for deserialization from config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::lifecycle::CancelSignal;
use crate::resilience::Executor;
use crate::strategy::{
    AdaptiveTimeout, ExponentialBackoff, FixedInterval, Strategy, StrategyError, ThreadSafe,
};

/// Root configuration for a retry policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RetryConfig {
    /// Base backoff schedule.
    pub strategy: StrategyConfig,

    /// Optional failure-window gate around the base schedule.
    pub adaptive: AdaptiveConfig,

    /// Executor behaviour.
    pub executor: ExecutorConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl RetryConfig {
    /// Build the configured strategy stack.
    ///
    /// Composition order, innermost first: base schedule, adaptive gate,
    /// thread-safe wrapper.
    pub fn build_strategy(&self) -> Result<Box<dyn Strategy>, StrategyError> {
        let base: Box<dyn Strategy> = match self.strategy.kind {
            StrategyKind::Fixed => Box::new(FixedInterval::new(
                self.strategy.interval(),
                self.strategy.max_retries,
            )?),
            StrategyKind::Exponential => Box::new(ExponentialBackoff::new(
                self.strategy.interval(),
                self.strategy.max_interval(),
                self.strategy.max_retries,
            )?),
        };

        let gated: Box<dyn Strategy> = if self.adaptive.enabled {
            Box::new(AdaptiveTimeout::new(
                base,
                self.adaptive.window_words,
                self.adaptive.failure_threshold,
            )?)
        } else {
            base
        };

        if self.executor.thread_safe {
            Ok(Box::new(ThreadSafe::new(gated)))
        } else {
            Ok(gated)
        }
    }

    pub fn executor(&self) -> Executor {
        Executor::from_config(&self.executor)
    }
}

/// Backoff schedule kind.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Fixed,
    #[default]
    Exponential,
}

/// Base backoff schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub kind: StrategyKind,

    /// Fixed interval, or the first exponential interval, in milliseconds.
    pub interval_ms: u64,

    /// Exponential ceiling in milliseconds. Ignored for `fixed`.
    pub max_interval_ms: u64,

    /// Maximum number of retries after the first attempt (0 = unbounded).
    pub max_retries: u32,
}

impl StrategyConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn max_interval(&self) -> Duration {
        Duration::from_millis(self.max_interval_ms)
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: StrategyKind::Exponential,
            interval_ms: 100,
            max_interval_ms: 2000,
            max_retries: 3,
        }
    }
}

/// Failure-window gate.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdaptiveConfig {
    pub enabled: bool,

    /// Window size in 64-outcome words.
    pub window_words: usize,

    /// Failures in the window at which retries are refused.
    pub failure_threshold: u32,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            window_words: 1,
            failure_threshold: 32,
        }
    }
}

/// Executor behaviour.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Report every attempt's outcome back to the strategy.
    pub report_outcomes: bool,

    /// Serialize all strategy calls behind a lock.
    pub thread_safe: bool,

    /// Overall deadline per run in milliseconds (0 = none).
    pub timeout_ms: u64,
}

impl ExecutorConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }

    /// A fresh cancel signal carrying the configured deadline.
    pub fn cancel_signal(&self) -> CancelSignal {
        match self.timeout() {
            Some(timeout) => CancelSignal::with_timeout(timeout),
            None => CancelSignal::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit JSON log lines instead of the pretty format.
    pub json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}
