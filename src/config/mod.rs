//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → RetryConfig (validated, immutable)
//!     → build_strategy() / executor() / cancel_signal()
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Strategy constructors still validate; config checks report every problem at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    AdaptiveConfig, ExecutorConfig, ObservabilityConfig, RetryConfig, StrategyConfig, StrategyKind,
};
pub use validation::{validate_config, ValidationError};
