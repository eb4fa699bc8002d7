//! Structured logging setup.
//!
//! # Responsibilities
//! - Install the global tracing subscriber for binaries
//! - Honour `RUST_LOG` over the configured level
//! - Pretty output by default, JSON when configured

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// Error returned when a global subscriber is already installed.
pub type InitError = tracing_subscriber::util::TryInitError;

/// Install the global subscriber described by `config`.
pub fn init(config: &ObservabilityConfig) -> Result<(), InitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}

fn default_directive(level: &str) -> String {
    format!("retry_strategy={level},retryctl={level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive("debug"), "retry_strategy=debug,retryctl=debug");
    }
}
