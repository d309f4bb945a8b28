//! Colour palettes for the terminal renderer.
//!
//! Two presets matching the page's themes:
//! - dark (default)
//! - light

use crossterm::style::Color;

use crate::types::NotifyKind;

/// Resolved colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub name: &'static str,
    pub primary: Color,
    pub accent: Color,
    pub text: Color,
    pub text_muted: Color,
    pub background: Color,
    /// Nav bar background once the page has scrolled.
    pub surface: Color,
    pub bar_fill: Color,
    pub bar_track: Color,
}

const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb { r, g, b }
}

// =============================================================================
// Dark Theme (Default)
// =============================================================================

pub const fn dark() -> Palette {
    Palette {
        name: "dark",
        primary: rgb(96, 165, 250),  // blue-400
        accent: rgb(192, 132, 252),  // purple-400
        text: rgb(241, 245, 249),
        text_muted: rgb(148, 163, 184),
        background: rgb(15, 23, 42),
        surface: rgb(30, 41, 59),
        bar_fill: rgb(56, 189, 248), // sky-400
        bar_track: rgb(51, 65, 85),
    }
}

// =============================================================================
// Light Theme
// =============================================================================

pub const fn light() -> Palette {
    Palette {
        name: "light",
        primary: rgb(37, 99, 235),
        accent: rgb(147, 51, 234),
        text: rgb(15, 23, 42),
        text_muted: rgb(100, 116, 139),
        background: rgb(248, 250, 252),
        surface: rgb(226, 232, 240),
        bar_fill: rgb(2, 132, 199),
        bar_track: rgb(203, 213, 225),
    }
}

impl Palette {
    pub const fn for_theme(dark_mode: bool) -> Self {
        if dark_mode { dark() } else { light() }
    }

    /// Toast background for a notification kind.
    pub const fn toast(kind: NotifyKind) -> Color {
        let (r, g, b) = kind.rgb();
        rgb(r, g, b)
    }
}
