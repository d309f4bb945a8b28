//! Platform capabilities.
//!
//! The coordinator never touches a real clock or a real viewport directly. It
//! talks to these two traits instead, so a page can be driven by a manual clock
//! and a scroll model in tests and in the terminal demo alike.
//!
//! - [`Timers`] - current time and one-shot delayed callbacks
//! - [`VisibilitySource`] - one-shot "root entered the viewport" observers

mod clock;
mod viewport;

pub use clock::ManualClock;
pub use viewport::{ScrollViewport, HEADER_OFFSET};

use std::rc::Rc;

use crate::error::Result;
use crate::types::{Millis, Threshold};

/// Identifier of a registered visibility observer.
pub type ObserverId = u64;

/// Timer capability (`setTimeout` equivalent).
///
/// Timers cannot be cancelled. Callbacks that outlive their owner must check
/// for themselves whether there is still anything to do.
pub trait Timers {
    /// Current page time.
    fn now_ms(&self) -> Millis;

    /// Run `callback` once, `delay_ms` after now.
    fn after(&self, delay_ms: Millis, callback: Box<dyn FnOnce()>);
}

/// Intersection observation capability (`IntersectionObserver` equivalent).
///
/// Observers are one-shot: `on_enter` fires at most once, the first time the
/// root's intersection ratio meets `threshold`, and the observer is released
/// right after firing.
pub trait VisibilitySource {
    /// Start observing `root`.
    ///
    /// Fails with [`FolioError::MissingElement`](crate::FolioError::MissingElement)
    /// when no element with that id exists. The source may fire `on_enter`
    /// before returning if the root is already visible.
    fn observe(
        &self,
        root: &str,
        threshold: Threshold,
        on_enter: Box<dyn FnOnce()>,
    ) -> Result<ObserverId>;

    /// Stop observing. Returns `false` if the observer already fired or was
    /// already disconnected.
    fn disconnect(&self, id: ObserverId) -> bool;

    /// Number of observers still waiting to fire.
    fn active_observers(&self) -> usize;
}

/// The capabilities a page is mounted against.
#[derive(Clone)]
pub struct Platform {
    pub timers: Rc<dyn Timers>,
    /// `None` when intersection observation is unavailable; sections then
    /// reveal on mount.
    pub visibility: Option<Rc<dyn VisibilitySource>>,
}

impl Platform {
    pub fn new(timers: Rc<dyn Timers>, visibility: Option<Rc<dyn VisibilitySource>>) -> Self {
        Self { timers, visibility }
    }

    /// Manual clock plus scroll viewport, the pairing used by tests and the demo.
    pub fn manual(clock: &ManualClock, viewport: &ScrollViewport) -> Self {
        Self {
            timers: Rc::new(clock.clone()),
            visibility: Some(Rc::new(viewport.clone())),
        }
    }

    pub fn now_ms(&self) -> Millis {
        self.timers.now_ms()
    }
}
