//! Manual Clock - Deterministic timer queue
//!
//! The page runs on one thread and only ever waits on timers, so time can be
//! modelled as a queue of deadlines that is drained as the clock advances.
//! Tests advance the clock by exact amounts; the terminal demo advances it by
//! real elapsed time on every tick.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use spark_folio::platform::{ManualClock, Timers};
//!
//! let clock = ManualClock::new();
//! let fired = Rc::new(Cell::new(false));
//! let flag = fired.clone();
//! clock.after(500, Box::new(move || flag.set(true)));
//!
//! clock.advance(499);
//! assert!(!fired.get());
//! clock.advance(1);
//! assert!(fired.get());
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use tracing::{trace, warn};

use super::Timers;
use crate::types::Millis;

/// Upper bound on timers fired by a single `advance_to` or `run_until_idle`
/// call. Stops callbacks that keep rescheduling themselves forever.
const MAX_STEPS: usize = 10_000;

// =============================================================================
// CLOCK STATE
// =============================================================================

struct ClockState {
    now: Millis,
    /// Insertion sequence, breaks ties between equal deadlines (FIFO).
    seq: u64,
    queue: BTreeMap<(Millis, u64), Box<dyn FnOnce()>>,
}

/// A clock that only moves when told to.
///
/// Cloning yields another handle to the same clock.
#[derive(Clone)]
pub struct ManualClock {
    state: Rc<RefCell<ClockState>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    /// Create a clock at t=0 with no pending timers.
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(ClockState {
                now: 0,
                seq: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.state.borrow().queue.keys().next().map(|(due, _)| *due)
    }

    /// Move time forward by `ms`, firing every timer that comes due on the way.
    ///
    /// Timers fire in deadline order, with `now_ms()` equal to their deadline
    /// while they run. Timers scheduled by a callback fire in the same call if
    /// their deadline is within the window. Returns the number of timers fired.
    pub fn advance(&self, ms: Millis) -> usize {
        let target = self.now_ms().saturating_add(ms);
        self.advance_to(target)
    }

    /// Move time forward to `target` (time never moves backwards).
    ///
    /// Gives up after `MAX_STEPS` timers; time then stays at the last fired
    /// deadline and the rest stay pending.
    pub fn advance_to(&self, target: Millis) -> usize {
        self.fire_until(target, MAX_STEPS)
    }

    fn fire_until(&self, target: Millis, budget: usize) -> usize {
        let mut fired = 0;
        loop {
            if fired >= budget {
                warn!(fired, target, "timer step limit reached");
                return fired;
            }
            // Release the borrow before running the callback: callbacks
            // schedule new timers on this same clock.
            let callback = {
                let mut state = self.state.borrow_mut();
                let due = match state.queue.keys().next() {
                    Some(&(due, _)) if due <= target => due,
                    _ => break,
                };
                state.now = state.now.max(due);
                state.queue.pop_first().map(|(_, cb)| cb)
            };
            if let Some(callback) = callback {
                callback();
                fired += 1;
            }
        }

        let mut state = self.state.borrow_mut();
        state.now = state.now.max(target);
        fired
    }

    /// Fire timers until none remain, jumping time to each deadline.
    ///
    /// Returns the number of timers fired.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_deadline() {
            if fired >= MAX_STEPS {
                break;
            }
            fired += self.fire_until(due, MAX_STEPS - fired);
        }
        fired
    }
}

impl Timers for ManualClock {
    fn now_ms(&self) -> Millis {
        self.state.borrow().now
    }

    fn after(&self, delay_ms: Millis, callback: Box<dyn FnOnce()>) {
        let mut state = self.state.borrow_mut();
        let due = state.now.saturating_add(delay_ms);
        let seq = state.seq;
        state.seq += 1;
        trace!(due, delay_ms, "timer scheduled");
        state.queue.insert((due, seq), callback);
    }
}

// =============================================================================
// TESTS
// =============================================================================
