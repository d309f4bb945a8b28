//! Core types for spark-folio.
//!
//! These are the small value types that flow between the sensor, the reveal
//! state, the planners and the renderer. None of them own any reactive state.

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};

// =============================================================================
// Time
// =============================================================================

/// Milliseconds on the page clock.
///
/// The page clock starts at 0 when the clock is created and only moves forward.
pub type Millis = u64;

// =============================================================================
// Threshold
// =============================================================================

/// Intersection ratio a section must reach before it counts as visible.
///
/// Always within `[0.0, 1.0]`. A threshold of `0.0` fires as soon as a single
/// pixel of the root is on screen.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Threshold(f32);

impl Threshold {
    pub const ZERO: Self = Self(0.0);

    /// Create a threshold, rejecting NaN and anything outside `[0, 1]`.
    pub fn new(ratio: f32) -> Result<Self> {
        if ratio.is_nan() || !(0.0..=1.0).contains(&ratio) {
            return Err(FolioError::validation(
                "threshold",
                format!("{ratio} is not within [0, 1]"),
            ));
        }
        Ok(Self(ratio))
    }

    pub fn ratio(self) -> f32 {
        self.0
    }

    /// Whether an observed intersection ratio satisfies this threshold.
    ///
    /// A root with no overlap never satisfies a threshold, even `0.0`.
    pub fn is_met_by(self, ratio: f32) -> bool {
        ratio > 0.0 && ratio >= self.0
    }
}

impl TryFrom<f32> for Threshold {
    type Error = FolioError;

    fn try_from(ratio: f32) -> Result<Self> {
        Self::new(ratio)
    }
}

impl From<Threshold> for f32 {
    fn from(t: Threshold) -> Self {
        t.0
    }
}

// =============================================================================
// SkillLevel
// =============================================================================

/// A skill percentage, guaranteed to be within `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MAX: u8 = 100;

    pub fn new(level: i64) -> Result<Self> {
        if !(0..=Self::MAX as i64).contains(&level) {
            return Err(FolioError::validation(
                "level",
                format!("{level} is not within [0, 100]"),
            ));
        }
        Ok(Self(level as u8))
    }

    /// Clamp to 100 instead of rejecting.
    pub const fn saturating(level: u8) -> Self {
        if level > Self::MAX { Self(Self::MAX) } else { Self(level) }
    }

    pub fn percent(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for SkillLevel {
    type Error = FolioError;

    fn try_from(level: i64) -> Result<Self> {
        Self::new(level)
    }
}

impl From<SkillLevel> for u8 {
    fn from(level: SkillLevel) -> Self {
        level.0
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// Vertical extent of an element on the page, in pixels.
///
/// Horizontal geometry is irrelevant to reveal decisions, so it is not tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub top: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(top: u32, height: u32) -> Self {
        Self { top, height }
    }

    pub const fn bottom(&self) -> u32 {
        self.top + self.height
    }

    /// Fraction of this rect visible inside `[view_top, view_top + view_height)`.
    ///
    /// Empty rects report 0.0.
    pub fn intersection_ratio(&self, view_top: u32, view_height: u32) -> f32 {
        if self.height == 0 {
            return 0.0;
        }
        let view_bottom = view_top.saturating_add(view_height);
        let overlap_top = self.top.max(view_top);
        let overlap_bottom = self.bottom().min(view_bottom);
        if overlap_bottom <= overlap_top {
            return 0.0;
        }
        (overlap_bottom - overlap_top) as f32 / self.height as f32
    }
}

// =============================================================================
// Item styling
// =============================================================================

/// Direction an item slides in from before it is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Translate {
    /// Slides up from below.
    #[default]
    Up,
    /// Slides in from the left.
    FromLeft,
    /// Slides in from the right.
    FromRight,
    /// Fades/scales in place.
    None,
}

/// Computed presentation of one item at one instant.
///
/// `revealed` mirrors the section's reveal state; `active` is true once the
/// item's own stagger delay has elapsed as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStyle {
    pub index: usize,
    pub revealed: bool,
    pub active: bool,
    pub delay_ms: Millis,
    pub translate: Translate,
}

impl ItemStyle {
    /// Opacity in percent: 0 before the item activates, 100 afterwards.
    pub fn opacity(&self) -> u8 {
        if self.active { 100 } else { 0 }
    }
}

// =============================================================================
// Notifications
// =============================================================================

/// Kind of a toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    Success,
    #[default]
    Info,
}

impl NotifyKind {
    /// Background colour as RGB.
    ///
    /// Success is hsl(142, 76%, 36%), info is hsl(220, 50%, 47%).
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Success => (22, 163, 74),
            Self::Info => (60, 100, 180),
        }
    }
}

// =============================================================================
// UI flags (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Page chrome state owned by the UI controller.
    ///
    /// Combine with bitwise OR: `UiFlags::DARK | UiFlags::MENU_OPEN`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct UiFlags: u8 {
        const NONE = 0;
        /// Dark theme active.
        const DARK = 1 << 0;
        /// Mobile menu expanded.
        const MENU_OPEN = 1 << 1;
        /// Page scrolled past the nav threshold.
        const NAV_SCROLLED = 1 << 2;
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_bounds() {
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(1.0).is_ok());
        assert!(Threshold::new(-0.1).is_err());
        assert!(Threshold::new(1.5).is_err());
        assert!(Threshold::new(f32::NAN).is_err());
    }

    #[test]
    fn test_threshold_needs_overlap() {
        let zero = Threshold::ZERO;
        assert!(!zero.is_met_by(0.0));
        assert!(zero.is_met_by(0.01));

        let t = Threshold::new(0.3).unwrap();
        assert!(!t.is_met_by(0.29));
        assert!(t.is_met_by(0.3));
    }

    #[test]
    fn test_skill_level_bounds() {
        assert_eq!(SkillLevel::new(0).unwrap().percent(), 0);
        assert_eq!(SkillLevel::new(100).unwrap().percent(), 100);
        assert!(matches!(
            SkillLevel::new(101),
            Err(FolioError::Validation { .. })
        ));
        assert!(SkillLevel::new(-1).is_err());
    }

    #[test]
    fn test_skill_level_deserialize_validates() {
        #[derive(Deserialize)]
        struct Row {
            level: SkillLevel,
        }
        let ok: Row = serde_json::from_str(r#"{"level": 85}"#).unwrap();
        assert_eq!(ok.level.percent(), 85);
        assert!(serde_json::from_str::<Row>(r#"{"level": 140}"#).is_err());
    }

    #[test]
    fn test_rect_intersection_ratio() {
        let rect = Rect::new(100, 200);

        // Fully above the viewport
        assert_eq!(rect.intersection_ratio(400, 100), 0.0);
        // Fully inside
        assert_eq!(rect.intersection_ratio(0, 1000), 1.0);
        // Top half visible
        assert!((rect.intersection_ratio(0, 200) - 0.5).abs() < f32::EPSILON);
        // Touching edges do not count
        assert_eq!(rect.intersection_ratio(0, 100), 0.0);
        // Empty rect
        assert_eq!(Rect::new(0, 0).intersection_ratio(0, 100), 0.0);
    }

    #[test]
    fn test_item_style_opacity() {
        let mut style = ItemStyle {
            index: 0,
            revealed: true,
            active: false,
            delay_ms: 100,
            translate: Translate::Up,
        };
        assert_eq!(style.opacity(), 0);
        style.active = true;
        assert_eq!(style.opacity(), 100);
    }

    #[test]
    fn test_ui_flags_combine() {
        let flags = UiFlags::DARK | UiFlags::MENU_OPEN;
        assert!(flags.contains(UiFlags::DARK));
        assert!(!flags.contains(UiFlags::NAV_SCROLLED));
    }
}
