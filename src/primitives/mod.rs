//! Primitives - Page building blocks.
//!
//! There is a single primitive: [`section`], one scroll-anchored region with
//! its own reveal. Every part of the page (about, skills, projects, ...) is a
//! section parameterised by its props and content.
//!
//! # Lifecycle
//!
//! 1. Create reveal state and stagger plan
//! 2. Attach a one-shot visibility sensor to the root element
//! 3. On intersection, flip reveal state and arm progress bars
//! 4. On unmount (or drop), disconnect the sensor and go inert

mod section;
mod types;

pub use section::{section, SectionHandle};
pub use types::*;
