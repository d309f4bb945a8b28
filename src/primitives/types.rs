//! Primitive types - Props.
//!
//! Props describe a section before it mounts: which root element it observes,
//! how it staggers its items and which skill bars it drives.

use crate::config::{ProgressConfig, SectionConfig};
use crate::types::SkillLevel;

// =============================================================================
// Section Props
// =============================================================================

/// Props for [`section`](super::section).
///
/// ```ignore
/// let handle = section(SectionProps {
///     id: "projects".to_string(),
///     items: 4,
///     config: page_config.section("projects"),
///     ..Default::default()
/// }, &platform)?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SectionProps {
    /// Id of the root element to observe.
    pub id: String,
    /// Reveal threshold, stagger and slide direction.
    pub config: SectionConfig,
    /// Number of staggered items.
    pub items: usize,
    /// Skill bars, in display order. Empty for sections without bars.
    pub bars: Vec<SkillLevel>,
    /// Bar timing (ignored when `bars` is empty).
    pub progress: ProgressConfig,
    /// Fail the mount when the root is missing instead of mounting without a
    /// sensor.
    pub strict: bool,
}

impl Default for SectionProps {
    fn default() -> Self {
        Self {
            id: String::new(),
            config: SectionConfig::default(),
            items: 0,
            bars: Vec::new(),
            progress: ProgressConfig::default(),
            strict: cfg!(debug_assertions),
        }
    }
}
