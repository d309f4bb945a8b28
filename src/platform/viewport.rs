//! Scroll Viewport - Page geometry, scrolling and intersection observers
//!
//! Models the page as a column of named elements with vertical extents, plus a
//! viewport window at a scroll offset. It is the [`VisibilitySource`] used by
//! the demo and by tests.
//!
//! - Element rects are placed by whoever lays out the page
//! - Scroll offset is clamped to `[0, content_height - viewport_height]`
//! - Observers are evaluated on registration and after every scroll or resize

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tracing::{debug, trace};

use super::{ObserverId, VisibilitySource};
use crate::error::{FolioError, Result};
use crate::types::{Rect, Threshold};

/// Height of the fixed navigation bar. Scroll targets land this far below it.
pub const HEADER_OFFSET: u32 = 80;

// =============================================================================
// VIEWPORT STATE
// =============================================================================

struct Observer {
    root: String,
    threshold: Threshold,
    on_enter: Box<dyn FnOnce()>,
}

struct ViewportState {
    height: u32,
    scroll_y: u32,
    header_offset: u32,
    elements: HashMap<String, Rect>,
    observers: BTreeMap<ObserverId, Observer>,
    next_observer: ObserverId,
}

impl ViewportState {
    fn content_height(&self) -> u32 {
        self.elements.values().map(Rect::bottom).max().unwrap_or(0)
    }

    fn max_scroll(&self) -> u32 {
        self.content_height().saturating_sub(self.height)
    }

    /// Remove and return every observer whose root now meets its threshold.
    fn take_triggered(&mut self) -> Vec<(ObserverId, Box<dyn FnOnce()>)> {
        let (height, scroll_y) = (self.height, self.scroll_y);
        let elements = &self.elements;
        let ready: Vec<ObserverId> = self
            .observers
            .iter()
            .filter(|(_, obs)| {
                elements
                    .get(&obs.root)
                    .map(|rect| obs.threshold.is_met_by(rect.intersection_ratio(scroll_y, height)))
                    .unwrap_or(false)
            })
            .map(|(id, _)| *id)
            .collect();

        ready
            .into_iter()
            .filter_map(|id| self.observers.remove(&id).map(|obs| (id, obs.on_enter)))
            .collect()
    }
}

/// Scrollable page model.
///
/// Cloning yields another handle to the same viewport.
#[derive(Clone)]
pub struct ScrollViewport {
    state: Rc<RefCell<ViewportState>>,
}

impl ScrollViewport {
    /// Create a viewport `height` pixels tall, scrolled to the top, with the
    /// standard header offset.
    pub fn new(height: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(ViewportState {
                height,
                scroll_y: 0,
                header_offset: HEADER_OFFSET,
                elements: HashMap::new(),
                observers: BTreeMap::new(),
                next_observer: 1,
            })),
        }
    }

    /// Override the header offset used by [`scroll_to`](Self::scroll_to).
    pub fn with_header_offset(self, offset: u32) -> Self {
        self.state.borrow_mut().header_offset = offset;
        self
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// Place (or move) an element. Observers are re-evaluated.
    pub fn place(&self, id: impl Into<String>, rect: Rect) {
        self.state.borrow_mut().elements.insert(id.into(), rect);
        self.evaluate();
    }

    /// Remove an element from the page.
    pub fn remove(&self, id: &str) -> Option<Rect> {
        self.state.borrow_mut().elements.remove(id)
    }

    pub fn element(&self, id: &str) -> Option<Rect> {
        self.state.borrow().elements.get(id).copied()
    }

    pub fn height(&self) -> u32 {
        self.state.borrow().height
    }

    pub fn content_height(&self) -> u32 {
        self.state.borrow().content_height()
    }

    pub fn max_scroll(&self) -> u32 {
        self.state.borrow().max_scroll()
    }

    /// Visible fraction of an element, or `None` if it is not on the page.
    pub fn intersection_ratio(&self, id: &str) -> Option<f32> {
        let state = self.state.borrow();
        state
            .elements
            .get(id)
            .map(|rect| rect.intersection_ratio(state.scroll_y, state.height))
    }

    /// Change the viewport height (window resize). Scroll is re-clamped.
    pub fn resize(&self, height: u32) {
        {
            let mut state = self.state.borrow_mut();
            state.height = height;
            state.scroll_y = state.scroll_y.min(state.max_scroll());
        }
        self.evaluate();
    }

    // =========================================================================
    // SCROLL OPERATIONS
    // =========================================================================

    pub fn scroll_y(&self) -> u32 {
        self.state.borrow().scroll_y
    }

    /// Set the scroll offset (clamped to the valid range).
    pub fn set_scroll(&self, y: u32) {
        {
            let mut state = self.state.borrow_mut();
            state.scroll_y = y.min(state.max_scroll());
        }
        self.evaluate();
    }

    /// Scroll by a delta.
    ///
    /// Returns `true` if scrolling occurred, `false` if already at the boundary.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let (current, max) = {
            let state = self.state.borrow();
            (state.scroll_y, state.max_scroll())
        };
        let next = (current as i64 + delta as i64).clamp(0, max as i64) as u32;
        if next == current {
            return false;
        }
        self.set_scroll(next);
        true
    }

    /// Scroll so that `id` sits just below the fixed header.
    ///
    /// Returns the resulting scroll offset.
    pub fn scroll_to(&self, id: &str) -> Result<u32> {
        let target = {
            let state = self.state.borrow();
            let rect = state
                .elements
                .get(id)
                .ok_or_else(|| FolioError::missing(id))?;
            rect.top.saturating_sub(state.header_offset)
        };
        self.set_scroll(target);
        Ok(self.scroll_y())
    }

    pub fn scroll_to_top(&self) {
        self.set_scroll(0);
    }

    pub fn scroll_to_bottom(&self) {
        let max = self.max_scroll();
        self.set_scroll(max);
    }

    // =========================================================================
    // OBSERVERS
    // =========================================================================

    /// Fire every observer whose root currently meets its threshold.
    ///
    /// Callbacks run with no borrow held, so they may observe, disconnect or
    /// scroll re-entrantly.
    fn evaluate(&self) {
        let triggered = self.state.borrow_mut().take_triggered();
        for (id, on_enter) in triggered {
            trace!(observer = id, "observer fired");
            on_enter();
        }
    }
}

impl VisibilitySource for ScrollViewport {
    fn observe(
        &self,
        root: &str,
        threshold: Threshold,
        on_enter: Box<dyn FnOnce()>,
    ) -> Result<ObserverId> {
        let id = {
            let mut state = self.state.borrow_mut();
            if !state.elements.contains_key(root) {
                return Err(FolioError::missing(root));
            }
            let id = state.next_observer;
            state.next_observer += 1;
            state.observers.insert(
                id,
                Observer {
                    root: root.to_string(),
                    threshold,
                    on_enter,
                },
            );
            id
        };
        debug!(observer = id, root, threshold = threshold.ratio(), "observer attached");

        // Initial observation, like IntersectionObserver's first callback
        self.evaluate();
        Ok(id)
    }

    fn disconnect(&self, id: ObserverId) -> bool {
        let removed = self.state.borrow_mut().observers.remove(&id).is_some();
        if removed {
            debug!(observer = id, "observer disconnected");
        }
        removed
    }

    fn active_observers(&self) -> usize {
        self.state.borrow().observers.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
