//! Page configuration.
//!
//! Reveal timing per section, progress-bar timing, mock action latencies and
//! page chrome constants. Everything has a default matching the stock page;
//! a TOML file only needs to name what it changes.
//!
//! ```toml
//! strict = false
//!
//! [sections.projects]
//! threshold = 0.25
//! step_ms = 150
//!
//! [actions.contact_submit]
//! latency_ms = 1500
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FolioError, Result};
use crate::platform::HEADER_OFFSET;
use crate::types::{Millis, Threshold, Translate};

/// Action name of the contact form submission.
pub const CONTACT_SUBMIT: &str = "contact_submit";
/// Action name of the resume download.
pub const RESUME_DOWNLOAD: &str = "resume_download";
/// Action name of the resume preview.
pub const RESUME_PREVIEW: &str = "resume_preview";

// =============================================================================
// Section reveal settings
// =============================================================================

/// How one section reveals itself and staggers its items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Intersection ratio that counts as "entered the viewport".
    pub threshold: Threshold,
    /// Delay of item 0 after the reveal.
    pub base_delay_ms: Millis,
    /// Extra delay per item index.
    pub step_ms: Millis,
    /// Direction items slide in from.
    pub translate: Translate,
    /// Skip the sensor and reveal as soon as the section mounts.
    pub reveal_on_mount: bool,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            threshold: Threshold::new(0.1).unwrap_or(Threshold::ZERO),
            base_delay_ms: 0,
            step_ms: 100,
            translate: Translate::Up,
            reveal_on_mount: false,
        }
    }
}

impl SectionConfig {
    fn observed(threshold: f32, base_delay_ms: Millis, step_ms: Millis, translate: Translate) -> Self {
        Self {
            threshold: Threshold::new(threshold).unwrap_or(Threshold::ZERO),
            base_delay_ms,
            step_ms,
            translate,
            reveal_on_mount: false,
        }
    }
}

// =============================================================================
// Progress bar settings
// =============================================================================

/// Timing of skill progress bars, relative to their section's reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Fixed wait after the reveal before any bar starts.
    pub offset_ms: Millis,
    /// Extra wait per bar index.
    pub step_ms: Millis,
    /// Length of the width transition.
    pub duration_ms: Millis,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            offset_ms: 500,
            step_ms: 150,
            duration_ms: 1000,
        }
    }
}

// =============================================================================
// Mock action settings
// =============================================================================

/// Fixed latency of one mock action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    pub latency_ms: Millis,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self { latency_ms: 1000 }
    }
}

// =============================================================================
// PageConfig
// =============================================================================

/// Complete page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Fail section mounts on missing elements instead of skipping the sensor.
    pub strict: bool,
    /// Height of the fixed header; scroll targets land below it.
    pub header_offset: u32,
    /// Scroll offset past which the nav bar switches to its scrolled style.
    pub nav_scroll_threshold: u32,
    /// How long a toast stays up unless dismissed.
    pub notification_ttl_ms: Millis,
    /// Per-section reveal settings, keyed by section id.
    pub sections: BTreeMap<String, SectionConfig>,
    /// Skill bar timing.
    pub progress: ProgressConfig,
    /// Per-action latency, keyed by action name.
    pub actions: BTreeMap<String, ActionConfig>,
}

impl Default for PageConfig {
    fn default() -> Self {
        let sections = BTreeMap::from([
            (
                "home".to_string(),
                SectionConfig {
                    base_delay_ms: 300,
                    step_ms: 200,
                    reveal_on_mount: true,
                    ..SectionConfig::default()
                },
            ),
            ("about".to_string(), SectionConfig::observed(0.3, 800, 200, Translate::None)),
            ("skills".to_string(), SectionConfig::observed(0.3, 0, 100, Translate::Up)),
            ("experience".to_string(), SectionConfig::observed(0.3, 0, 300, Translate::FromLeft)),
            ("projects".to_string(), SectionConfig::observed(0.2, 0, 200, Translate::Up)),
            ("resume".to_string(), SectionConfig::observed(0.5, 700, 200, Translate::None)),
            ("contact".to_string(), SectionConfig::observed(0.3, 300, 200, Translate::FromLeft)),
        ]);

        let actions = BTreeMap::from([
            (CONTACT_SUBMIT.to_string(), ActionConfig { latency_ms: 2000 }),
            (RESUME_DOWNLOAD.to_string(), ActionConfig { latency_ms: 1000 }),
            (RESUME_PREVIEW.to_string(), ActionConfig { latency_ms: 1000 }),
        ]);

        Self {
            strict: cfg!(debug_assertions),
            header_offset: HEADER_OFFSET,
            nav_scroll_threshold: 50,
            notification_ttl_ms: 5000,
            sections,
            progress: ProgressConfig::default(),
            actions,
        }
    }
}

impl PageConfig {
    /// Parse a TOML document. Sections and actions it does not mention keep
    /// their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: PageConfig = toml::from_str(source)?;
        let defaults = PageConfig::default();
        for (id, section) in defaults.sections {
            config.sections.entry(id).or_insert(section);
        }
        for (name, action) in defaults.actions {
            config.actions.entry(name).or_insert(action);
        }
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| FolioError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Settings for a section, falling back to [`SectionConfig::default`].
    pub fn section(&self, id: &str) -> SectionConfig {
        self.sections.get(id).cloned().unwrap_or_default()
    }

    /// Latency of an action, falling back to [`ActionConfig::default`].
    pub fn action(&self, name: &str) -> ActionConfig {
        self.actions.get(name).copied().unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_page() {
        let config = PageConfig::default();

        assert_eq!(config.section("about").threshold.ratio(), 0.3);
        assert_eq!(config.section("projects").threshold.ratio(), 0.2);
        assert_eq!(config.section("resume").threshold.ratio(), 0.5);
        assert_eq!(config.section("experience").step_ms, 300);
        assert!(config.section("home").reveal_on_mount);

        assert_eq!(config.progress.offset_ms, 500);
        assert_eq!(config.progress.step_ms, 150);

        assert_eq!(config.action(CONTACT_SUBMIT).latency_ms, 2000);
        assert_eq!(config.notification_ttl_ms, 5000);
        assert_eq!(config.header_offset, 80);
    }

    #[test]
    fn test_unknown_section_falls_back() {
        let config = PageConfig::default();
        assert_eq!(config.section("blog"), SectionConfig::default());
        assert_eq!(config.action("subscribe"), ActionConfig::default());
    }

    #[test]
    fn test_partial_toml_keeps_other_defaults() {
        let config = PageConfig::from_toml_str(
            r#"
            strict = false

            [sections.projects]
            threshold = 0.25
            step_ms = 150

            [actions.contact_submit]
            latency_ms = 1500
            "#,
        )
        .unwrap();

        assert!(!config.strict);
        assert_eq!(config.section("projects").threshold.ratio(), 0.25);
        assert_eq!(config.section("projects").step_ms, 150);
        assert_eq!(config.section("resume").threshold.ratio(), 0.5);
        assert_eq!(config.action(CONTACT_SUBMIT).latency_ms, 1500);
        assert_eq!(config.action(RESUME_DOWNLOAD).latency_ms, 1000);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let err = PageConfig::from_toml_str("[sections.about]\nthreshold = 1.5\n").unwrap_err();
        assert!(matches!(err, FolioError::ConfigParse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = PageConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, FolioError::ConfigRead { .. }));
    }
}
