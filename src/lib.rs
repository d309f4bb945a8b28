//! # spark-folio
//!
//! Scroll-driven reveal coordinator for single-page portfolios.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for fine-grained reactivity.
//!
//! ## Architecture
//!
//! Each section owns a one-shot visibility sensor. When the sensor fires, the
//! section's reveal flag flips (once, forever) and everything downstream is
//! derived from that flag and the page clock:
//!
//! ```text
//! VisibilitySource → Section sensor → RevealState → StaggerPlan → ItemStyle
//!                                                 ↘ ProgressDriver → bar width
//! ```
//!
//! Mock actions (contact form, resume download and preview) run on the same
//! clock and report through one toast surface.
//!
//! Browser capabilities are traits ([`platform::Timers`],
//! [`platform::VisibilitySource`]). [`platform::ManualClock`] and
//! [`platform::ScrollViewport`] implement them for tests and the terminal demo.
//!
//! ## Modules
//!
//! - [`types`] - Value types (Threshold, SkillLevel, ItemStyle, UiFlags, ...)
//! - [`platform`] - Timer and visibility capabilities
//! - [`state`] - Reveal, stagger, progress, actions, toasts, UI flags
//! - [`primitives`] - The section component
//! - [`content`] / [`config`] - What the page shows and how it animates
//! - [`page`] - The mounted page
//! - [`renderer`] - crossterm output

pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod page;
pub mod platform;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod types;

// Re-export commonly used items
pub use types::*;

pub use config::{ActionConfig, PageConfig, ProgressConfig, SectionConfig};
pub use content::{ItemContent, PageContent, SectionContent, SkillContent, SocialLink};
pub use error::{FolioError, Result};
pub use logging::init_tracing;

pub use page::{
    layout, BarSnapshot, ContactField, ContactForm, ItemSnapshot, Page, PageSnapshot,
    SectionSnapshot,
};

pub use platform::{ManualClock, ObserverId, Platform, ScrollViewport, Timers, VisibilitySource};

pub use primitives::{section, SectionHandle, SectionProps};

pub use renderer::{Palette, TerminalRenderer};

pub use state::{
    // Reveal
    RevealState,
    // Stagger
    stagger_delay, StaggerPlan,
    // Progress
    target_width_percent, ProgressBar, ProgressDriver,
    // Actions
    Ack, ActionState, MockAction, Ticket,
    // Notifications
    Notifier, Toast,
    // UI
    UiController,
};
