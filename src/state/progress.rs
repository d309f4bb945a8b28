//! Progress Bar Driver - Skill level bars gated by reveal and stagger
//!
//! A bar's width stays at 0% until two things have happened, in order:
//!
//! 1. its section has been revealed, which arms the driver
//! 2. the bar's own delay (fixed offset + index stagger) has elapsed
//!
//! Only then does the bar start its width transition towards the skill level.
//! A bar constructed long before its section reveals therefore never animates
//! early, whatever order timers fire in.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::{signal, Signal};
use tracing::debug;

use super::stagger::StaggerPlan;
use crate::config::ProgressConfig;
use crate::error::Result;
use crate::platform::Timers;
use crate::types::{Millis, SkillLevel};

/// Target width of a bar for a skill level (identity on valid levels).
///
/// Fails with a validation error when `level` is outside `[0, 100]`.
pub fn target_width_percent(level: i64) -> Result<u8> {
    SkillLevel::new(level).map(SkillLevel::percent)
}

/// Ease-out cubic: fast start, slow finish.
fn ease_out_cubic(t: f32) -> f32 {
    1.0 - (1.0 - t).powi(3)
}

// =============================================================================
// ProgressBar
// =============================================================================

/// One skill bar.
#[derive(Clone)]
pub struct ProgressBar {
    index: usize,
    level: SkillLevel,
    duration_ms: Millis,
    started_at: Signal<Option<Millis>>,
}

impl ProgressBar {
    pub fn new(index: usize, level: SkillLevel, duration_ms: Millis) -> Self {
        Self {
            index,
            level,
            duration_ms,
            started_at: signal(None),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn level(&self) -> SkillLevel {
        self.level
    }

    /// Page time the width transition started (tracked read).
    pub fn started_at(&self) -> Option<Millis> {
        self.started_at.get()
    }

    /// Width the bar is transitioning towards: 0 before start, level after.
    pub fn target_width(&self) -> u8 {
        match self.started_at() {
            Some(_) => self.level.percent(),
            None => 0,
        }
    }

    /// Rendered width at `now`, eased over the transition duration.
    pub fn width_at(&self, now: Millis) -> u8 {
        let Some(start) = self.started_at() else {
            return 0;
        };
        if now <= start {
            return 0;
        }
        let level = self.level.percent() as f32;
        if self.duration_ms == 0 {
            return self.level.percent();
        }
        let t = ((now - start) as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        (level * ease_out_cubic(t)).round() as u8
    }

    fn start(&self, at: Millis) {
        if self.started_at.get().is_none() {
            self.started_at.set(Some(at));
        }
    }
}

// =============================================================================
// ProgressDriver
// =============================================================================

/// Drives a group of bars from one section's reveal.
pub struct ProgressDriver {
    plan: StaggerPlan,
    bars: Vec<ProgressBar>,
    armed: Cell<bool>,
}

impl ProgressDriver {
    /// Bars are indexed in order of `levels`.
    pub fn new(config: &ProgressConfig, levels: impl IntoIterator<Item = SkillLevel>) -> Self {
        let bars = levels
            .into_iter()
            .enumerate()
            .map(|(index, level)| ProgressBar::new(index, level, config.duration_ms))
            .collect();
        Self {
            plan: StaggerPlan::from(config),
            bars,
            armed: Cell::new(false),
        }
    }

    pub fn bars(&self) -> &[ProgressBar] {
        &self.bars
    }

    pub fn plan(&self) -> StaggerPlan {
        self.plan
    }

    pub fn is_armed(&self) -> bool {
        self.armed.get()
    }

    /// Schedule every bar's start. Called once, when the section reveals.
    ///
    /// Timers cannot be cancelled, so each callback checks `alive` and does
    /// nothing once the owning section has unmounted. Arming twice is a no-op.
    pub fn arm(&self, timers: &Rc<dyn Timers>, alive: &Rc<Cell<bool>>) {
        if self.armed.replace(true) {
            return;
        }
        let now = timers.now_ms();
        for bar in &self.bars {
            let delay = self.plan.delay(bar.index);
            let due = now.saturating_add(delay);
            let bar = bar.clone();
            let alive = alive.clone();
            debug!(bar = bar.index, delay, "progress bar scheduled");
            timers.after(
                delay,
                Box::new(move || {
                    if alive.get() {
                        bar.start(due);
                    }
                }),
            );
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
