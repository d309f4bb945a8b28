//! Portfolio Example - The stock page in a real terminal
//!
//! Drives the page with a manual clock advanced by real elapsed time and a
//! scroll viewport sized to the terminal.
//!
//! Keys:
//! - Up / Down / PgUp / PgDn / Home: scroll
//! - 1-7: nav links
//! - t: theme, m: mobile menu
//! - s: submit a sample contact form
//! - d / p: resume download / preview
//! - w: "View My Work", o: toggle the first project card
//! - q / Esc: quit
//!
//! Optional arguments: `[config.toml] [content.toml]`
//!
//! Run with: cargo run --example portfolio

use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::Show,
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tracing::warn;

use spark_folio::{
    init_tracing, ContactField, ManualClock, Page, PageConfig,
    PageContent, Platform, ScrollViewport, TerminalRenderer, Timers,
};

/// Terminal rows to page pixels.
const PX_PER_ROW: u32 = 24;
const TICK: Duration = Duration::from_millis(33);

fn load() -> spark_folio::Result<(PageConfig, PageContent)> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    };
    let content = match args.next() {
        Some(path) => PageContent::load(path)?,
        None => PageContent::default(),
    };
    Ok((config, content))
}

fn scroll(page: &Page, delta: i32) -> spark_folio::Result<()> {
    page.scroll_by(delta);
    Ok(())
}

fn submit_sample(page: &Page) -> spark_folio::Result<()> {
    page.set_field(ContactField::Name, "Ada Lovelace");
    page.set_field(ContactField::Email, "ada@example.com");
    page.set_field(ContactField::Subject, "Analytical engines");
    page.set_field(ContactField::Message, "Let's build something.");
    page.submit_contact().map(drop)
}

fn main() -> io::Result<()> {
    // Logs go to stderr, which shares the screen: enable with FOLIO_LOG=debug 2>folio.log
    init_tracing("off");

    let (config, content) = load().map_err(io::Error::other)?;

    let (width, height) = terminal::size()?;
    let clock = ManualClock::new();
    let viewport = ScrollViewport::new(height as u32 * PX_PER_ROW);
    let page = Page::mount(
        content,
        config,
        &Platform::manual(&clock, &viewport),
        viewport.clone(),
    )
    .map_err(io::Error::other)?;

    terminal::enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen)?;

    let result = run(&page, &clock, &viewport, width, height);

    execute!(stdout(), LeaveAlternateScreen, Show)?;
    terminal::disable_raw_mode()?;

    page.unmount();
    result
}

fn run(
    page: &Page,
    clock: &ManualClock,
    viewport: &ScrollViewport,
    width: u16,
    height: u16,
) -> io::Result<()> {
    let mut renderer = TerminalRenderer::new(stdout(), width, height);
    let step = PX_PER_ROW as i32;
    let start = Instant::now();

    loop {
        renderer.render(&page.snapshot(clock.now_ms()))?;

        if event::poll(TICK)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let outcome = match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Down => scroll(page, step),
                        KeyCode::Up => scroll(page, -step),
                        KeyCode::PageDown => scroll(page, step * 10),
                        KeyCode::PageUp => scroll(page, -step * 10),
                        KeyCode::Home => {
                            page.scroll_to_top();
                            Ok(())
                        }
                        KeyCode::Char('t') => {
                            page.toggle_theme();
                            Ok(())
                        }
                        KeyCode::Char('m') => {
                            page.toggle_menu();
                            Ok(())
                        }
                        KeyCode::Char('w') => page.view_work().map(drop),
                        KeyCode::Char('o') => page.select_project(0).map(drop),
                        KeyCode::Char('d') => page.download_resume().map(drop),
                        KeyCode::Char('p') => page.preview_resume().map(drop),
                        KeyCode::Char('s') => submit_sample(page),
                        KeyCode::Char(c @ '1'..='9') => {
                            page.navigate_nth(c as usize - '0' as usize).map(drop)
                        }
                        _ => Ok(()),
                    };
                    if let Err(err) = outcome {
                        warn!(error = %err, "key ignored");
                    }
                }
                Event::Resize(w, h) => {
                    renderer.resize(w, h);
                    viewport.resize(h as u32 * PX_PER_ROW);
                    page.ui().sync_scroll();
                }
                _ => {}
            }
        }

        // Page time follows wall time
        clock.advance_to(start.elapsed().as_millis() as u64);
    }
}
