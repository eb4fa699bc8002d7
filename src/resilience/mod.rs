//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! execute(cancel, strategy, operation):
//!     → operation() succeeds → Ok(value)
//!     → operation() fails → strategy.advance()
//!         → None → RetryError::AttemptsExhausted
//!         → Some(wait) → timer reset → select { timer, cancel }
//!             → timer → next attempt
//!             → cancel → RetryError::Cancelled(reason)
//! ```
//!
//! # Design Decisions
//! - One executor run is strictly sequential; attempts never overlap
//! - The strategy is the only state shared across runs

pub mod retries;

pub use retries::{execute, Executor, RetryError};
