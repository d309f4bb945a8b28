//! Terminal renderer - Draws a [`PageSnapshot`] with crossterm.
//!
//! Each frame is drawn from scratch:
//!
//! 1. Nav bar on the first row (plus the mobile menu when open)
//! 2. Page body, windowed to the current scroll offset
//! 3. Toasts stacked at the top right
//!
//! Items that have not activated yet draw as blank rows, so the layout does
//! not jump when they fade in.

mod palette;

pub use palette::{dark, light, Palette};

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, MoveTo},
    queue,
    style::{Attribute, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use crate::page::{PageSnapshot, SectionSnapshot};
use crate::types::UiFlags;

const BAR_WIDTH: usize = 20;

// =============================================================================
// Lines
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Heading,
    Text,
    Muted,
    Accent,
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Line {
    Plain(Tone, String),
    Bar { label: String, level: u8, width: u8 },
}

impl Line {
    fn plain(tone: Tone, text: impl Into<String>) -> Self {
        Self::Plain(tone, text.into())
    }
}

fn item_tone(active: bool, tone: Tone) -> Tone {
    if active { tone } else { Tone::Hidden }
}

/// Body lines for one section.
fn section_lines(section: &SectionSnapshot, snapshot: &PageSnapshot) -> Vec<Line> {
    let heading_tone = if section.revealed { Tone::Heading } else { Tone::Hidden };
    let mut lines = vec![
        Line::plain(heading_tone, format!("## {}", section.heading)),
        Line::plain(Tone::Hidden, ""),
    ];

    for item in &section.items {
        let active = item.style.active;
        let marker = if item.selected { "v" } else { ">" };
        if !item.title.is_empty() {
            lines.push(Line::plain(
                item_tone(active, Tone::Text),
                format!("  {marker} {}", item.title),
            ));
        }
        if !item.detail.is_empty() {
            lines.push(Line::plain(
                item_tone(active, Tone::Muted),
                format!("    {}", item.detail),
            ));
        }
        if !item.tags.is_empty() {
            lines.push(Line::plain(
                item_tone(active, Tone::Accent),
                format!("    [{}]", item.tags.join("] [")),
            ));
        }
    }

    for bar in &section.bars {
        if bar.active {
            lines.push(Line::Bar {
                label: bar.name.clone(),
                level: bar.level,
                width: bar.width,
            });
        } else {
            lines.push(Line::plain(Tone::Hidden, ""));
        }
    }

    match section.id.as_str() {
        "contact" if section.revealed => {
            let form = &snapshot.form;
            for (label, value) in [
                ("name", &form.name),
                ("email", &form.email),
                ("subject", &form.subject),
                ("message", &form.message),
            ] {
                lines.push(Line::plain(Tone::Muted, format!("    {label:<8} {value}")));
            }
            let button = if snapshot.contact_busy { "[ Sending... ]" } else { "[ Send Message (s) ]" };
            lines.push(Line::plain(Tone::Accent, format!("    {button}")));
        }
        "resume" if section.revealed => {
            let download = if snapshot.download_busy { "[ Downloading... ]" } else { "[ Download (d) ]" };
            let preview = if snapshot.preview_busy { "[ Opening... ]" } else { "[ Preview (p) ]" };
            lines.push(Line::plain(Tone::Accent, format!("    {download}  {preview}")));
        }
        _ => {}
    }

    lines.push(Line::plain(Tone::Hidden, ""));
    lines
}

/// Body lines for the whole page, with the index of the first line shown at
/// the current scroll offset.
fn body(snapshot: &PageSnapshot) -> (Vec<Line>, usize) {
    let mut lines = Vec::new();
    let mut first = None;

    for section in &snapshot.sections {
        let section_lines = section_lines(section, snapshot);
        if first.is_none() && section.rect.bottom() > snapshot.scroll_y {
            // Proportional offset into the section
            let into = snapshot.scroll_y.saturating_sub(section.rect.top) as usize;
            let skip = into * section_lines.len() / section.rect.height.max(1) as usize;
            first = Some(lines.len() + skip);
        }
        lines.extend(section_lines);
    }

    lines.push(Line::plain(Tone::Muted, snapshot.footer.clone()));
    let first = first.unwrap_or(lines.len().saturating_sub(1));
    (lines, first)
}

fn clip(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

// =============================================================================
// TerminalRenderer
// =============================================================================

/// Writes frames to any `io::Write` (stdout in the demo, a buffer in tests).
pub struct TerminalRenderer<W: Write> {
    out: W,
    width: u16,
    height: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, width: u16, height: u16) -> Self {
        Self { out, width, height }
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Draw one frame and flush.
    pub fn render(&mut self, snapshot: &PageSnapshot) -> io::Result<()> {
        let palette = Palette::for_theme(snapshot.flags.contains(UiFlags::DARK));

        queue!(
            self.out,
            Hide,
            SetBackgroundColor(palette.background),
            Clear(ClearType::All)
        )?;

        let menu_rows = self.draw_nav(snapshot, &palette)?;
        self.draw_body(snapshot, &palette, 1 + menu_rows)?;
        self.draw_toasts(snapshot)?;

        queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        self.out.flush()
    }

    /// Nav bar and (if open) the mobile menu. Returns the menu's row count.
    fn draw_nav(&mut self, snapshot: &PageSnapshot, palette: &Palette) -> io::Result<u16> {
        let width = self.width as usize;
        let bg = if snapshot.flags.contains(UiFlags::NAV_SCROLLED) {
            palette.surface
        } else {
            palette.background
        };

        let links: Vec<String> = snapshot
            .sections
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{} {}", i + 1, s.label))
            .collect();
        let bar = format!(" Portfolio  |  {}  |  theme: {} (t)", links.join("  "), palette.name);

        queue!(
            self.out,
            MoveTo(0, 0),
            SetBackgroundColor(bg),
            SetForegroundColor(palette.primary),
            SetAttribute(Attribute::Bold),
            Print(format!("{:<width$}", clip(&bar, width))),
            SetAttribute(Attribute::Reset)
        )?;

        if !snapshot.flags.contains(UiFlags::MENU_OPEN) {
            return Ok(0);
        }
        let mut rows = 0;
        for link in &links {
            rows += 1;
            if rows >= self.height {
                break;
            }
            queue!(
                self.out,
                MoveTo(0, rows),
                SetBackgroundColor(palette.surface),
                SetForegroundColor(palette.text),
                Print(format!("{:<width$}", clip(&format!("   {link}"), width)))
            )?;
        }
        Ok(rows)
    }

    fn draw_body(&mut self, snapshot: &PageSnapshot, palette: &Palette, top: u16) -> io::Result<()> {
        let width = self.width as usize;
        let (lines, first) = body(snapshot);
        let visible = self.height.saturating_sub(top) as usize;

        for (row, line) in lines.iter().skip(first).take(visible).enumerate() {
            let y = top + row as u16;
            queue!(
                self.out,
                MoveTo(0, y),
                SetBackgroundColor(palette.background)
            )?;
            match line {
                Line::Plain(Tone::Hidden, _) => {}
                Line::Plain(tone, text) => {
                    let (color, attr) = match tone {
                        Tone::Heading => (palette.primary, Attribute::Bold),
                        Tone::Accent => (palette.accent, Attribute::NormalIntensity),
                        Tone::Muted => (palette.text_muted, Attribute::Dim),
                        _ => (palette.text, Attribute::NormalIntensity),
                    };
                    queue!(
                        self.out,
                        SetForegroundColor(color),
                        SetAttribute(attr),
                        Print(clip(text, width)),
                        SetAttribute(Attribute::Reset)
                    )?;
                }
                Line::Bar { label, level, width: pct } => {
                    let filled = *pct as usize * BAR_WIDTH / 100;
                    queue!(
                        self.out,
                        SetForegroundColor(palette.text),
                        Print(format!("  {:<20} ", clip(label, 20))),
                        SetForegroundColor(palette.bar_fill),
                        Print("#".repeat(filled)),
                        SetForegroundColor(palette.bar_track),
                        Print(".".repeat(BAR_WIDTH - filled)),
                        SetForegroundColor(palette.text_muted),
                        Print(format!(" {pct:>3}% / {level}%"))
                    )?;
                }
            }
        }
        Ok(())
    }

    fn draw_toasts(&mut self, snapshot: &PageSnapshot) -> io::Result<()> {
        for (i, toast) in snapshot.toasts.iter().enumerate() {
            let y = 1 + i as u16;
            if y >= self.height {
                break;
            }
            let text = format!(" {} ", toast.message);
            let len = text.chars().count() as u16;
            let x = self.width.saturating_sub(len + 1);
            queue!(
                self.out,
                MoveTo(x, y),
                SetBackgroundColor(Palette::toast(toast.kind)),
                SetForegroundColor(crossterm::style::Color::White),
                Print(clip(&text, self.width as usize))
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
