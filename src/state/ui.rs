//! UI Controller - Theme, mobile menu and navigation state
//!
//! The page chrome has three flags (dark theme, menu open, nav scrolled). They
//! live in one signal owned by the controller; every handler that touches them
//! goes through a `&UiController`.

use spark_signals::{signal, Signal};
use tracing::debug;

use crate::error::Result;
use crate::platform::ScrollViewport;
use crate::types::UiFlags;

/// Owner of the page chrome state.
#[derive(Clone)]
pub struct UiController {
    flags: Signal<UiFlags>,
    viewport: ScrollViewport,
    nav_scroll_threshold: u32,
}

impl UiController {
    /// Dark theme, menu closed, nav state taken from the current scroll.
    pub fn new(viewport: ScrollViewport, nav_scroll_threshold: u32) -> Self {
        let ui = Self {
            flags: signal(UiFlags::DARK),
            viewport,
            nav_scroll_threshold,
        };
        ui.sync_scroll();
        ui
    }

    /// Current flags (tracked read).
    pub fn flags(&self) -> UiFlags {
        self.flags.get()
    }

    pub fn is_dark(&self) -> bool {
        self.flags().contains(UiFlags::DARK)
    }

    pub fn is_menu_open(&self) -> bool {
        self.flags().contains(UiFlags::MENU_OPEN)
    }

    pub fn is_nav_scrolled(&self) -> bool {
        self.flags().contains(UiFlags::NAV_SCROLLED)
    }

    fn update(&self, f: impl FnOnce(&mut UiFlags)) {
        let mut flags = self.flags.get();
        f(&mut flags);
        self.flags.set(flags);
    }

    /// Flip between dark and light. Returns whether dark is now active.
    pub fn toggle_theme(&self) -> bool {
        self.update(|f| f.toggle(UiFlags::DARK));
        self.is_dark()
    }

    /// Open or close the mobile menu. Returns whether it is now open.
    pub fn toggle_menu(&self) -> bool {
        self.update(|f| f.toggle(UiFlags::MENU_OPEN));
        self.is_menu_open()
    }

    /// Recompute the nav style from the scroll offset.
    pub fn sync_scroll(&self) {
        let scrolled = self.viewport.scroll_y() > self.nav_scroll_threshold;
        self.update(|f| f.set(UiFlags::NAV_SCROLLED, scrolled));
    }

    /// Scroll by a delta, keeping the nav style in sync.
    pub fn scroll_by(&self, delta: i32) -> bool {
        let moved = self.viewport.scroll_by(delta);
        self.sync_scroll();
        moved
    }

    /// Follow a nav link: scroll to the section and close the menu if open.
    pub fn navigate(&self, section_id: &str) -> Result<u32> {
        let y = self.viewport.scroll_to(section_id)?;
        debug!(section = section_id, y, "navigate");
        if self.is_menu_open() {
            self.toggle_menu();
        }
        self.sync_scroll();
        Ok(y)
    }

    pub fn scroll_to_top(&self) {
        self.viewport.scroll_to_top();
        self.sync_scroll();
    }

    pub fn viewport(&self) -> &ScrollViewport {
        &self.viewport
    }
}
