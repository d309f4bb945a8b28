//! Reveal State - One-way visibility flag per section
//!
//! A section starts hidden and is revealed at most once. Reads go through a
//! signal, so any derived style or render effect that checks `is_revealed()`
//! re-runs when the flag flips.
//!
//! Writes are idempotent: revealing an already revealed section is a no-op and
//! keeps the original reveal time, so several sensors may safely share one
//! state (logical OR).

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};

use crate::types::Millis;

/// Monotonic `false -> true` flag with the time it flipped.
#[derive(Clone)]
pub struct RevealState {
    revealed: Signal<bool>,
    revealed_at: Rc<Cell<Option<Millis>>>,
}

impl Default for RevealState {
    fn default() -> Self {
        Self::new()
    }
}

impl RevealState {
    pub fn new() -> Self {
        Self {
            revealed: signal(false),
            revealed_at: Rc::new(Cell::new(None)),
        }
    }

    /// Whether the section has been revealed (tracked read).
    pub fn is_revealed(&self) -> bool {
        self.revealed.get()
    }

    /// Page time of the reveal, if it happened.
    pub fn revealed_at(&self) -> Option<Millis> {
        self.revealed_at.get()
    }

    /// Reveal at time `at`.
    ///
    /// Returns `true` only for the call that actually flipped the flag.
    pub fn reveal(&self, at: Millis) -> bool {
        if self.revealed_at.get().is_some() {
            return false;
        }
        // Time first: effects woken by the flag read it
        self.revealed_at.set(Some(at));
        self.revealed.set(true);
        true
    }

    /// The underlying signal, for wiring into effects and deriveds.
    pub fn signal(&self) -> Signal<bool> {
        self.revealed.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================
