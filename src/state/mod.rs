//! State Module - Runtime state of the page
//!
//! Reactive state systems behind the reveal coordinator:
//!
//! - **Reveal** - One-way visibility flag per section
//! - **Stagger** - Per-item activation delays
//! - **Progress** - Skill bars gated by reveal and stagger
//! - **Action** - Fixed-latency mock actions with a busy guard
//! - **Notify** - Toasts with auto-dismiss
//! - **UI** - Theme, mobile menu and nav state

pub mod action;
pub mod notify;
pub mod progress;
pub mod reveal;
pub mod stagger;
pub mod ui;

pub use action::{Ack, ActionState, MockAction, Ticket};
pub use notify::{Notifier, Toast};
pub use progress::{target_width_percent, ProgressBar, ProgressDriver};
pub use reveal::RevealState;
pub use stagger::{stagger_delay, StaggerPlan};
pub use ui::UiController;
