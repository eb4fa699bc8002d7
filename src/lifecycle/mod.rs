//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Caller creates a CancelSignal (cancel.rs)
//!     → optional deadline (with_timeout / with_deadline)
//!     → optional Ctrl+C hook (signals.rs)
//!     → passed by reference to every executor run
//!
//! Executor wait point:
//!     timer fires → next attempt
//!     signal fires → CancelReason returned verbatim
//! ```
//!
//! # Design Decisions
//! - Cancellation is cooperative: checked only while waiting between attempts
//! - Explicit cancellation wins over an expired deadline when both are ready

pub mod cancel;
pub mod signals;

pub use cancel::{CancelReason, CancelSignal};
