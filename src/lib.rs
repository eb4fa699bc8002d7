//! Pluggable retry strategies with a cancellable retry executor.
//!
//! ```text
//!   caller ──▶ execute(cancel, strategy, operation)
//!                 │
//!                 ├─▶ operation() ── Ok ──▶ return value
//!                 │        │
//!                 │       Err
//!                 │        ▼
//!                 ├─▶ strategy.advance() ── None ──▶ AttemptsExhausted
//!                 │        │
//!                 │     Some(wait)
//!                 │        ▼
//!                 └── select { timer(wait), cancel } ── cancel ──▶ Cancelled(reason)
//! ```
//!
//! Strategies: [`FixedInterval`], [`ExponentialBackoff`], the
//! failure-window gate [`AdaptiveTimeout`], and the [`ThreadSafe`] decorator.

// Core
pub mod resilience;
pub mod strategy;

// Cross-cutting concerns
pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::RetryConfig;
pub use lifecycle::{CancelReason, CancelSignal};
pub use resilience::{execute, Executor, RetryError};
pub use strategy::{
    AdaptiveTimeout, ExponentialBackoff, FixedInterval, Outcome, Strategy, StrategyError,
    ThreadSafe,
};
