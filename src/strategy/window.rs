//! Bit-packed sliding window of recent outcomes.
//!
//! A ring of `words × 64` bits. Each reported outcome takes the next slot
//! (request counter modulo capacity) and overwrites whatever was there, so the
//! window always describes the last `capacity` reports. A set bit is a failure.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::strategy::{Outcome, StrategyError};

const WORD_BITS: u64 = u64::BITS as u64;

/// Fixed-capacity circular buffer of failure bits.
#[derive(Debug)]
pub struct FailureWindow {
    words: Box<[AtomicU64]>,
    requests: AtomicU64,
}

impl FailureWindow {
    /// Create a window of `words` 64-bit words.
    pub fn new(words: usize) -> Result<Self, StrategyError> {
        if words == 0 {
            return Err(StrategyError::invalid("window_words", "must be greater than zero"));
        }
        Ok(Self {
            words: (0..words).map(|_| AtomicU64::new(0)).collect(),
            requests: AtomicU64::new(0),
        })
    }

    /// Total number of outcome slots.
    pub fn capacity(&self) -> u64 {
        self.words.len() as u64 * WORD_BITS
    }

    /// Total number of outcomes ever recorded.
    pub fn recorded(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Record an outcome in the next slot.
    pub fn record(&self, outcome: Outcome) {
        let slot = self.requests.fetch_add(1, Ordering::AcqRel) % self.capacity();
        let word = &self.words[(slot >> 6) as usize];
        let mask = 1u64 << (slot & 63);
        match outcome {
            Outcome::Failure => word.fetch_or(mask, Ordering::AcqRel),
            Outcome::Success => word.fetch_and(!mask, Ordering::AcqRel),
        };
    }

    /// Number of failures currently in the window.
    ///
    /// Summed as `u64` so it can always reach [`capacity`](Self::capacity).
    pub fn failures(&self) -> u64 {
        self.words
            .iter()
            .map(|word| u64::from(word.load(Ordering::Acquire).count_ones()))
            .sum()
    }
}
