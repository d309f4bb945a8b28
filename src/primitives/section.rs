//! Section Primitive - Scroll-revealed region with staggered items.
//!
//! Mounting a section acquires one visibility observer on its root element.
//! The observer is released exactly once: when it fires, or when the section
//! unmounts, whichever comes first. Dropping the handle counts as unmounting.
//!
//! # Example
//!
//! ```
//! use spark_folio::platform::{ManualClock, Platform, ScrollViewport, VisibilitySource};
//! use spark_folio::primitives::{section, SectionProps};
//! use spark_folio::Rect;
//!
//! let clock = ManualClock::new();
//! let viewport = ScrollViewport::new(600);
//! viewport.place("projects", Rect::new(2000, 800));
//!
//! let handle = section(
//!     SectionProps { id: "projects".to_string(), items: 4, ..Default::default() },
//!     &Platform::manual(&clock, &viewport),
//! )
//! .unwrap();
//! assert!(!handle.is_revealed());
//!
//! viewport.set_scroll(1800);
//! assert!(handle.is_revealed());
//!
//! handle.unmount();
//! assert_eq!(viewport.active_observers(), 0);
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, info, warn};

use super::types::SectionProps;
use crate::error::{FolioError, Result};
use crate::platform::{ObserverId, Platform, Timers, VisibilitySource};
use crate::state::{ProgressBar, ProgressDriver, RevealState, StaggerPlan};
use crate::types::{ItemStyle, Millis, Translate};

// =============================================================================
// Section State
// =============================================================================

struct SectionInner {
    id: String,
    reveal: RevealState,
    plan: StaggerPlan,
    translate: Translate,
    items: usize,
    progress: Option<ProgressDriver>,
    /// Cleared on unmount; late timer and sensor callbacks check it.
    alive: Rc<Cell<bool>>,
    timers: Rc<dyn Timers>,
}

impl SectionInner {
    /// Sensor callback: reveal once, then arm the progress bars.
    fn enter(&self) {
        if !self.alive.get() {
            return;
        }
        let now = self.timers.now_ms();
        if self.reveal.reveal(now) {
            info!(section = %self.id, at = now, "section revealed");
            if let Some(driver) = &self.progress {
                driver.arm(&self.timers, &self.alive);
            }
        }
    }
}

// =============================================================================
// Section Handle
// =============================================================================

/// A mounted section.
///
/// Holds the section's sensor. Call [`unmount`](Self::unmount) or drop the
/// handle to release it.
pub struct SectionHandle {
    inner: Rc<SectionInner>,
    sensor: Option<(Rc<dyn VisibilitySource>, ObserverId)>,
}

impl SectionHandle {
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Whether the section has been revealed (tracked read).
    pub fn is_revealed(&self) -> bool {
        self.inner.reveal.is_revealed()
    }

    pub fn revealed_at(&self) -> Option<Millis> {
        self.inner.reveal.revealed_at()
    }

    /// The section's reveal state, for wiring into effects.
    pub fn reveal_state(&self) -> RevealState {
        self.inner.reveal.clone()
    }

    pub fn plan(&self) -> StaggerPlan {
        self.inner.plan
    }

    pub fn item_count(&self) -> usize {
        self.inner.items
    }

    /// Whether an unfired sensor is still waiting on the root.
    pub fn has_sensor(&self) -> bool {
        self.sensor.is_some() && !self.is_revealed()
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.alive.get()
    }

    /// Style of item `index` at page time `now`.
    pub fn item_style(&self, index: usize, now: Millis) -> Option<ItemStyle> {
        if index >= self.inner.items {
            return None;
        }
        let revealed = self.is_revealed();
        Some(ItemStyle {
            index,
            revealed,
            active: revealed && self.inner.plan.is_active(self.revealed_at(), index, now),
            delay_ms: self.inner.plan.delay(index),
            translate: self.inner.translate,
        })
    }

    /// Styles of all items, in order.
    pub fn item_styles(&self, now: Millis) -> Vec<ItemStyle> {
        (0..self.inner.items)
            .filter_map(|i| self.item_style(i, now))
            .collect()
    }

    /// Skill bars driven by this section (empty for most sections).
    pub fn bars(&self) -> &[ProgressBar] {
        self.inner
            .progress
            .as_ref()
            .map(ProgressDriver::bars)
            .unwrap_or(&[])
    }

    /// Disconnect the sensor and stop reacting to timers.
    pub fn unmount(self) {
        // Drop does the work
    }

    fn release(&mut self) {
        self.inner.alive.set(false);
        if let Some((source, id)) = self.sensor.take() {
            if source.disconnect(id) {
                debug!(section = %self.inner.id, observer = id, "sensor released before firing");
            }
        }
    }
}

impl fmt::Debug for SectionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionHandle")
            .field("id", &self.inner.id)
            .field("revealed_at", &self.revealed_at())
            .field("has_sensor", &self.has_sensor())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}

impl Drop for SectionHandle {
    fn drop(&mut self) {
        self.release();
    }
}

// =============================================================================
// Section Function
// =============================================================================

/// Mount a section.
///
/// 1. Builds reveal state, stagger plan and (if `bars` is non-empty) a
///    progress driver
/// 2. Reveals immediately when `config.reveal_on_mount` is set or the
///    platform has no visibility source
/// 3. Otherwise attaches a one-shot sensor to the element `props.id`
///
/// A missing root element fails the mount in strict mode. In lax mode the
/// section mounts without a sensor and stays hidden.
pub fn section(props: SectionProps, platform: &Platform) -> Result<SectionHandle> {
    let SectionProps {
        id,
        config,
        items,
        bars,
        progress,
        strict,
    } = props;

    // 1. STATE
    let driver = (!bars.is_empty()).then(|| ProgressDriver::new(&progress, bars));
    let inner = Rc::new(SectionInner {
        id,
        reveal: RevealState::new(),
        plan: StaggerPlan::from(&config),
        translate: config.translate,
        items,
        progress: driver,
        alive: Rc::new(Cell::new(true)),
        timers: platform.timers.clone(),
    });

    // 2. IMMEDIATE REVEAL
    let source = match &platform.visibility {
        Some(source) if !config.reveal_on_mount => source.clone(),
        _ => {
            inner.enter();
            return Ok(SectionHandle {
                inner,
                sensor: None,
            });
        }
    };

    // 3. SENSOR
    let weak = Rc::downgrade(&inner);
    let on_enter = Box::new(move || {
        if let Some(section) = weak.upgrade() {
            section.enter();
        }
    });

    let sensor = match source.observe(&inner.id, config.threshold, on_enter) {
        // Already visible: the observer fired and was released inside observe
        Ok(_) if inner.reveal.is_revealed() => None,
        Ok(observer) => Some((source, observer)),
        Err(FolioError::MissingElement { id }) if !strict => {
            warn!(section = %id, "root element missing, section will not reveal");
            None
        }
        Err(err) => return Err(err),
    };

    Ok(SectionHandle { inner, sensor })
}

// =============================================================================
// Tests
// =============================================================================
