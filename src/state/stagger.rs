//! Staggered Animation Planner
//!
//! Items of a section activate one after another: item `i` starts
//! `base_delay_ms + i * step_ms` after the section is revealed.

use crate::config::{ProgressConfig, SectionConfig};
use crate::types::Millis;

/// Delay of item `index` relative to the reveal.
///
/// Index 0 gets exactly `base_delay_ms`. Saturates instead of overflowing.
pub fn stagger_delay(index: usize, base_delay_ms: Millis, step_ms: Millis) -> Millis {
    base_delay_ms.saturating_add((index as Millis).saturating_mul(step_ms))
}

/// Linear stagger schedule for one group of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StaggerPlan {
    pub base_delay_ms: Millis,
    pub step_ms: Millis,
}

impl StaggerPlan {
    pub const fn new(base_delay_ms: Millis, step_ms: Millis) -> Self {
        Self {
            base_delay_ms,
            step_ms,
        }
    }

    pub fn delay(&self, index: usize) -> Millis {
        stagger_delay(index, self.base_delay_ms, self.step_ms)
    }

    /// Same schedule pushed back by a fixed offset.
    pub fn offset(&self, extra_ms: Millis) -> Self {
        Self::new(self.base_delay_ms.saturating_add(extra_ms), self.step_ms)
    }

    /// Page time at which item `index` activates for a reveal at `revealed_at`.
    pub fn activates_at(&self, revealed_at: Millis, index: usize) -> Millis {
        revealed_at.saturating_add(self.delay(index))
    }

    /// Whether item `index` is active at `now`. Never true before a reveal.
    pub fn is_active(&self, revealed_at: Option<Millis>, index: usize, now: Millis) -> bool {
        revealed_at.is_some_and(|at| now >= self.activates_at(at, index))
    }
}

impl From<&SectionConfig> for StaggerPlan {
    fn from(config: &SectionConfig) -> Self {
        Self::new(config.base_delay_ms, config.step_ms)
    }
}

impl From<&ProgressConfig> for StaggerPlan {
    fn from(config: &ProgressConfig) -> Self {
        Self::new(config.offset_ms, config.step_ms)
    }
}
