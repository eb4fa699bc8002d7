//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Executor and strategies produce:
//!     → tracing events (retries, exhaustion, cancellation, gate opening)
//!     → metrics.rs (attempt/outcome counters, wait histogram)
//!
//! Binaries install:
//!     → logging.rs (tracing-subscriber with env filter)
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers and exporters is up to the binary
//! - Metrics go through the `metrics` facade and are no-ops without a recorder

pub mod logging;
pub mod metrics;
