//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals > 0, initial <= ceiling, window sizes > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RetryConfig → Result<(), Vec<ValidationError>>

use crate::config::schema::{RetryConfig, StrategyKind};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check `config` for values the strategy constructors would reject.
pub fn validate_config(config: &RetryConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let strategy = &config.strategy;

    if strategy.interval_ms == 0 {
        errors.push(ValidationError::new("strategy.interval_ms", "must be greater than zero"));
    }
    if strategy.kind == StrategyKind::Exponential && strategy.interval_ms > strategy.max_interval_ms {
        errors.push(ValidationError::new(
            "strategy.max_interval_ms",
            format!(
                "must be at least interval_ms ({} < {})",
                strategy.max_interval_ms, strategy.interval_ms
            ),
        ));
    }

    if config.adaptive.enabled {
        if config.adaptive.window_words == 0 {
            errors.push(ValidationError::new("adaptive.window_words", "must be greater than zero"));
        }
        if config.adaptive.failure_threshold == 0 {
            errors.push(ValidationError::new(
                "adaptive.failure_threshold",
                "must be greater than zero",
            ));
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("unknown level `{}`", config.observability.log_level),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
