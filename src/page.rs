//! Page - The mounted portfolio.
//!
//! Lays the content out on the viewport, mounts one section per content entry
//! and owns the page-wide collaborators: the UI controller, the toast surface,
//! the contact form and the three mock actions.
//!
//! A section that fails to mount is recorded and skipped. The rest of the page
//! mounts normally.
//!
//! # Example
//!
//! ```
//! use spark_folio::platform::{ManualClock, Platform, ScrollViewport};
//! use spark_folio::{Page, PageConfig, PageContent};
//!
//! let clock = ManualClock::new();
//! let viewport = ScrollViewport::new(720);
//! let page = Page::mount(
//!     PageContent::default(),
//!     PageConfig::default(),
//!     &Platform::manual(&clock, &viewport),
//!     viewport.clone(),
//! )
//! .unwrap();
//!
//! assert!(page.section("home").unwrap().is_revealed());
//! assert!(!page.section("projects").unwrap().is_revealed());
//!
//! page.navigate("projects").unwrap();
//! assert!(page.section("projects").unwrap().is_revealed());
//! ```

use std::rc::Rc;

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use spark_signals::{signal, Signal};
use tracing::{info, warn};

use crate::config::{PageConfig, CONTACT_SUBMIT, RESUME_DOWNLOAD, RESUME_PREVIEW};
use crate::content::{PageContent, SectionContent};
use crate::error::{FolioError, Result};
use crate::platform::{Platform, ScrollViewport, Timers};
use crate::primitives::{section, SectionHandle, SectionProps};
use crate::state::{MockAction, Notifier, Ticket, Toast, UiController};
use crate::types::{ItemStyle, Millis, NotifyKind, Rect, UiFlags};

/// Toast shown when the contact form has been sent.
pub const CONTACT_SENT: &str = "Message sent successfully! I'll get back to you soon.";
/// Toast shown when the resume download finishes.
pub const RESUME_DOWNLOADED: &str = "Resume download started!";
/// Toast shown when the resume preview is requested.
pub const RESUME_PREVIEW_SOON: &str = "Resume preview feature coming soon!";

// =============================================================================
// Layout
// =============================================================================

const SECTION_PADDING: u32 = 160;
const ITEM_HEIGHT: u32 = 120;
const BAR_HEIGHT: u32 = 48;
const FOOTER_HEIGHT: u32 = 200;

/// Id of the footer element placed after the last section.
pub const FOOTER_ID: &str = "footer";

fn section_height(section: &SectionContent) -> u32 {
    SECTION_PADDING
        + ITEM_HEIGHT * section.items.len() as u32
        + BAR_HEIGHT * section.skills.len() as u32
}

/// Stack the sections top to bottom, then the footer.
///
/// The first section fills at least one viewport.
pub fn layout(content: &PageContent, viewport: &ScrollViewport) -> Vec<(String, Rect)> {
    let mut top = 0;
    let mut placed = Vec::with_capacity(content.sections.len() + 1);

    for (i, section) in content.sections.iter().enumerate() {
        let mut height = section_height(section);
        if i == 0 {
            height = height.max(viewport.height());
        }
        placed.push((section.id.clone(), Rect::new(top, height)));
        top += height;
    }
    placed.push((FOOTER_ID.to_string(), Rect::new(top, FOOTER_HEIGHT)));

    for (id, rect) in &placed {
        viewport.place(id.clone(), *rect);
    }
    placed
}

// =============================================================================
// Contact form
// =============================================================================

/// A field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

/// Contents of the contact form. All four fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Subject => self.subject = value,
            ContactField::Message => self.message = value,
        }
    }

    /// First problem found, in field order.
    pub fn validate(&self) -> Result<()> {
        for field in ContactField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(FolioError::validation(field.name(), "is required"));
            }
        }
        if !looks_like_email(self.email.trim()) {
            return Err(FolioError::validation(
                "email",
                format!("`{}` is not an email address", self.email.trim()),
            ));
        }
        Ok(())
    }
}

/// `local@domain.tld` with no whitespace.
fn looks_like_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

// =============================================================================
// Snapshot
// =============================================================================

/// One item as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub style: ItemStyle,
    pub title: String,
    pub detail: String,
    pub tags: Vec<String>,
    pub selected: bool,
}

/// One skill bar as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSnapshot {
    pub name: String,
    pub soft: bool,
    pub level: u8,
    pub width: u8,
    /// The bar's row has passed its stagger delay.
    pub active: bool,
}

/// One section as it should be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSnapshot {
    pub id: String,
    pub label: String,
    pub heading: String,
    pub rect: Rect,
    pub mounted: bool,
    pub revealed: bool,
    pub items: Vec<ItemSnapshot>,
    pub bars: Vec<BarSnapshot>,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSnapshot {
    pub now: Millis,
    pub flags: UiFlags,
    pub scroll_y: u32,
    pub viewport_height: u32,
    pub sections: Vec<SectionSnapshot>,
    pub toasts: Vec<Toast>,
    pub form: ContactForm,
    pub contact_busy: bool,
    pub download_busy: bool,
    pub preview_busy: bool,
    pub footer: String,
}

// =============================================================================
// Page
// =============================================================================

/// The mounted page.
///
/// Dropping the page unmounts every section.
pub struct Page {
    content: PageContent,
    config: PageConfig,
    timers: Rc<dyn Timers>,
    ui: UiController,
    notifier: Notifier,
    sections: Vec<SectionHandle>,
    failures: Vec<(String, FolioError)>,
    form: Signal<ContactForm>,
    contact: MockAction,
    download: MockAction,
    preview: MockAction,
    selected_project: Signal<Option<usize>>,
}

impl Page {
    /// Mount `content` against `platform`.
    ///
    /// `viewport` receives the layout and backs navigation. It is normally the
    /// same viewport that serves as `platform.visibility`.
    ///
    /// Only invalid content fails the whole mount. Per-section failures are
    /// collected in [`failures`](Self::failures).
    pub fn mount(
        content: PageContent,
        config: PageConfig,
        platform: &Platform,
        viewport: ScrollViewport,
    ) -> Result<Self> {
        content.validate()?;

        // 1. LAYOUT
        let viewport = viewport.with_header_offset(config.header_offset);
        layout(&content, &viewport);

        // 2. SHARED COLLABORATORS
        let timers = platform.timers.clone();
        let notifier = Notifier::new(timers.clone(), config.notification_ttl_ms);
        let ui = UiController::new(viewport, config.nav_scroll_threshold);

        let action = |name: &str, message: &str, kind: NotifyKind| {
            MockAction::new(
                name,
                config.action(name).latency_ms,
                timers.clone(),
                notifier.clone(),
            )
            .with_completion(message, kind)
        };
        let contact = action(CONTACT_SUBMIT, CONTACT_SENT, NotifyKind::Success);
        let download = action(RESUME_DOWNLOAD, RESUME_DOWNLOADED, NotifyKind::Success);
        let preview = action(RESUME_PREVIEW, RESUME_PREVIEW_SOON, NotifyKind::Info);

        // 3. CONTACT FORM (cleared once sent)
        let form = signal(ContactForm::default());
        let reset = form.clone();
        contact.on_complete(move |_| {
            reset.set(ContactForm::default());
        });

        // 4. SECTIONS
        let mut sections = Vec::with_capacity(content.sections.len());
        let mut failures = Vec::new();
        for entry in &content.sections {
            let props = SectionProps {
                id: entry.id.clone(),
                config: config.section(&entry.id),
                items: entry.item_count(),
                bars: entry.levels(),
                progress: config.progress,
                strict: config.strict,
            };
            match section(props, platform) {
                Ok(handle) => sections.push(handle),
                Err(err) => {
                    warn!(section = %entry.id, error = %err, "section failed to mount");
                    failures.push((entry.id.clone(), err));
                }
            }
        }

        info!(
            sections = sections.len(),
            failed = failures.len(),
            "page mounted"
        );

        Ok(Self {
            content,
            config,
            timers,
            ui,
            notifier,
            sections,
            failures,
            form,
            contact,
            download,
            preview,
            selected_project: signal(None),
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn content(&self) -> &PageContent {
        &self.content
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn ui(&self) -> &UiController {
        &self.ui
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn now_ms(&self) -> Millis {
        self.timers.now_ms()
    }

    /// Mounted sections, in page order.
    pub fn sections(&self) -> &[SectionHandle] {
        &self.sections
    }

    pub fn section(&self, id: &str) -> Option<&SectionHandle> {
        self.sections.iter().find(|s| s.id() == id)
    }

    /// Sections that failed to mount, with the reason.
    pub fn failures(&self) -> &[(String, FolioError)] {
        &self.failures
    }

    pub fn contact_action(&self) -> &MockAction {
        &self.contact
    }

    pub fn download_action(&self) -> &MockAction {
        &self.download
    }

    pub fn preview_action(&self) -> &MockAction {
        &self.preview
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    pub fn scroll_by(&self, delta: i32) -> bool {
        self.ui.scroll_by(delta)
    }

    /// Follow the nav link for `id`.
    pub fn navigate(&self, id: &str) -> Result<u32> {
        self.ui.navigate(id)
    }

    /// Follow the `n`th nav link, counting from 1.
    pub fn navigate_nth(&self, n: usize) -> Result<u32> {
        let id = n
            .checked_sub(1)
            .and_then(|i| self.content.sections.get(i))
            .map(|s| s.id.clone())
            .ok_or_else(|| {
                FolioError::validation(
                    "nav link",
                    format!("{n} is not within [1, {}]", self.content.sections.len()),
                )
            })?;
        self.navigate(&id)
    }

    /// Hero call to action: scroll to the section after the hero.
    pub fn view_work(&self) -> Result<u32> {
        let id = self
            .content
            .sections
            .get(1)
            .map(|s| s.id.clone())
            .ok_or_else(|| FolioError::missing("next section"))?;
        self.navigate(&id)
    }

    pub fn scroll_to_top(&self) {
        self.ui.scroll_to_top();
    }

    pub fn toggle_theme(&self) -> bool {
        self.ui.toggle_theme()
    }

    pub fn toggle_menu(&self) -> bool {
        self.ui.toggle_menu()
    }

    // =========================================================================
    // CONTACT FORM
    // =========================================================================

    /// Current form contents (tracked read).
    pub fn form(&self) -> ContactForm {
        self.form.get()
    }

    pub fn set_field(&self, field: ContactField, value: impl Into<String>) {
        let mut form = self.form.get();
        form.set(field, value);
        self.form.set(form);
    }

    /// Validate and send the form.
    ///
    /// The submit control is disabled while the send is in flight; the form is
    /// cleared and a success toast shown when it completes.
    pub fn submit_contact(&self) -> Result<Ticket> {
        let form = self.form.get();
        form.validate()?;
        self.contact.submit(&form)
    }

    // =========================================================================
    // RESUME
    // =========================================================================

    pub fn download_resume(&self) -> Result<Ticket> {
        self.download.trigger()
    }

    pub fn preview_resume(&self) -> Result<Ticket> {
        self.preview.trigger()
    }

    // =========================================================================
    // PROJECTS
    // =========================================================================

    /// Toggle the expanded project card. Selecting the expanded card again
    /// collapses it. Returns the new selection.
    pub fn select_project(&self, index: usize) -> Result<Option<usize>> {
        let count = self
            .content
            .section("projects")
            .map(|s| s.items.len())
            .unwrap_or(0);
        if index >= count {
            return Err(FolioError::validation(
                "project",
                format!("{index} is not below {count}"),
            ));
        }
        let next = match self.selected_project.get() {
            Some(current) if current == index => None,
            _ => Some(index),
        };
        self.selected_project.set(next);
        Ok(next)
    }

    /// Currently expanded project card (tracked read).
    pub fn selected_project(&self) -> Option<usize> {
        self.selected_project.get()
    }

    // =========================================================================
    // FOOTER
    // =========================================================================

    /// Current calendar year from the wall clock.
    pub fn footer_year() -> i32 {
        chrono::Local::now().year()
    }

    pub fn footer_text(&self) -> String {
        format!(
            "\u{a9} {} {}. All rights reserved.",
            Self::footer_year(),
            self.content.name
        )
    }

    // =========================================================================
    // SNAPSHOT
    // =========================================================================

    /// Everything needed to draw the page at `now`.
    pub fn snapshot(&self, now: Millis) -> PageSnapshot {
        let viewport = self.ui.viewport();
        let selected = self.selected_project();

        let sections = self
            .content
            .sections
            .iter()
            .map(|entry| {
                let handle = self.section(&entry.id);
                let rect = viewport.element(&entry.id).unwrap_or_default();
                let styles = handle.map(|h| h.item_styles(now)).unwrap_or_default();

                let items = styles
                    .iter()
                    .zip(&entry.items)
                    .map(|(style, item)| {
                        let selected = entry.id == "projects" && selected == Some(style.index);
                        let detail = if selected && !item.expanded.is_empty() {
                            item.expanded.clone()
                        } else {
                            item.detail.clone()
                        };
                        ItemSnapshot {
                            style: *style,
                            title: item.title.clone(),
                            detail,
                            tags: item.tags.clone(),
                            selected,
                        }
                    })
                    .collect();

                let bars = match handle {
                    Some(h) => h
                        .bars()
                        .iter()
                        .zip(&entry.skills)
                        .map(|(bar, skill)| BarSnapshot {
                            name: skill.name.clone(),
                            soft: skill.soft,
                            level: bar.level().percent(),
                            width: bar.width_at(now),
                            active: styles
                                .get(entry.items.len() + bar.index())
                                .is_some_and(|s| s.active),
                        })
                        .collect(),
                    None => Vec::new(),
                };

                SectionSnapshot {
                    id: entry.id.clone(),
                    label: entry.label.clone(),
                    heading: entry.heading.clone(),
                    rect,
                    mounted: handle.is_some(),
                    revealed: handle.is_some_and(SectionHandle::is_revealed),
                    items,
                    bars,
                }
            })
            .collect();

        PageSnapshot {
            now,
            flags: self.ui.flags(),
            scroll_y: viewport.scroll_y(),
            viewport_height: viewport.height(),
            sections,
            toasts: self.notifier.toasts(),
            form: self.form(),
            contact_busy: self.contact.is_busy(),
            download_busy: self.download.is_busy(),
            preview_busy: self.preview.is_busy(),
            footer: self.footer_text(),
        }
    }

    /// Unmount every section. Equivalent to dropping the page.
    pub fn unmount(self) {
        info!(sections = self.sections.len(), "page unmounted");
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ManualClock, VisibilitySource};
    use crate::state::ActionState;

    fn setup() -> (ManualClock, ScrollViewport, Page) {
        let clock = ManualClock::new();
        let viewport = ScrollViewport::new(720);
        let config = PageConfig {
            strict: true,
            ..PageConfig::default()
        };
        let page = Page::mount(
            PageContent::default(),
            config,
            &Platform::manual(&clock, &viewport),
            viewport.clone(),
        )
        .unwrap();
        (clock, viewport, page)
    }

    fn fill(page: &Page) {
        page.set_field(ContactField::Name, "Ada Lovelace");
        page.set_field(ContactField::Email, "ada@example.com");
        page.set_field(ContactField::Subject, "Engines");
        page.set_field(ContactField::Message, "Let's talk.");
    }

    #[test]
    fn test_layout_stacks_sections() {
        let content = PageContent::default();
        let viewport = ScrollViewport::new(720);
        let placed = layout(&content, &viewport);

        assert_eq!(placed.len(), content.sections.len() + 1);
        assert_eq!(placed[0].1, Rect::new(0, 760));
        for pair in placed.windows(2) {
            assert_eq!(pair[0].1.bottom(), pair[1].1.top);
        }
        assert_eq!(viewport.element(FOOTER_ID), Some(placed.last().unwrap().1));
    }

    #[test]
    fn test_mount_reveals_only_hero() {
        let (_clock, _viewport, page) = setup();
        assert_eq!(page.sections().len(), 7);
        assert!(page.failures().is_empty());

        let revealed: Vec<_> = page
            .sections()
            .iter()
            .filter(|s| s.is_revealed())
            .map(|s| s.id())
            .collect();
        assert_eq!(revealed, ["home"]);
    }

    #[test]
    fn test_hero_blocks_stagger() {
        let (_clock, _viewport, page) = setup();
        let hero = page.section("home").unwrap();
        let delays: Vec<_> = hero.item_styles(0).iter().map(|s| s.delay_ms).collect();
        assert_eq!(delays, [300, 500, 700, 900, 1100]);
        assert_eq!(hero.item_styles(700).iter().filter(|s| s.active).count(), 3);
    }

    #[test]
    fn test_navigation_reveals_target() {
        let (_clock, viewport, page) = setup();
        let y = page.navigate("skills").unwrap();
        assert_eq!(y, viewport.element("skills").unwrap().top - 80);
        assert!(page.section("skills").unwrap().is_revealed());
        assert!(page.ui().is_nav_scrolled());
    }

    #[test]
    fn test_navigate_nth() {
        let (_clock, _viewport, page) = setup();
        page.navigate_nth(7).unwrap();
        assert!(page.section("contact").unwrap().is_revealed());
        assert!(matches!(
            page.navigate_nth(0),
            Err(FolioError::Validation { field: "nav link", .. })
        ));
        assert!(page.navigate_nth(8).is_err());
    }

    #[test]
    fn test_view_work_goes_to_about() {
        let (_clock, _viewport, page) = setup();
        page.view_work().unwrap();
        assert!(page.section("about").unwrap().is_revealed());
    }

    #[test]
    fn test_contact_submit_lifecycle() {
        let (clock, _viewport, page) = setup();
        fill(&page);

        let ticket = page.submit_contact().unwrap();
        assert_eq!(page.contact_action().state(), ActionState::Busy);
        assert!(matches!(
            page.submit_contact(),
            Err(FolioError::DuplicateTrigger { .. })
        ));

        clock.advance(1999);
        assert_eq!(page.form().name, "Ada Lovelace");
        clock.advance(1);

        assert!(ticket.is_complete());
        assert!(!page.contact_action().is_busy());
        assert_eq!(page.form(), ContactForm::default());
        let toasts = page.notifier().toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, CONTACT_SENT);
        assert_eq!(toasts[0].kind, NotifyKind::Success);
    }

    #[test]
    fn test_contact_validation() {
        let (clock, _viewport, page) = setup();
        assert!(matches!(
            page.submit_contact(),
            Err(FolioError::Validation { field: "name", .. })
        ));

        fill(&page);
        page.set_field(ContactField::Email, "not-an-address");
        assert!(matches!(
            page.submit_contact(),
            Err(FolioError::Validation { field: "email", .. })
        ));
        assert!(!page.contact_action().is_busy());
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_email_shapes() {
        assert!(looks_like_email("a@b.co"));
        assert!(!looks_like_email("a@b"));
        assert!(!looks_like_email("@b.co"));
        assert!(!looks_like_email("a@.co"));
        assert!(!looks_like_email("a@b.co."));
        assert!(!looks_like_email("a b@c.de"));
        assert!(!looks_like_email("a@b@c.de"));
    }

    #[test]
    fn test_resume_actions() {
        let (clock, _viewport, page) = setup();
        page.download_resume().unwrap();
        page.preview_resume().unwrap();
        assert!(page.download_resume().is_err());

        clock.advance(1000);
        let toasts = page.notifier().toasts();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].message, RESUME_DOWNLOADED);
        assert_eq!(toasts[1].message, RESUME_PREVIEW_SOON);
        assert_eq!(toasts[1].kind, NotifyKind::Info);

        clock.advance(5000);
        assert!(page.notifier().toasts().is_empty());
    }

    #[test]
    fn test_select_project_toggles() {
        let (_clock, _viewport, page) = setup();
        assert_eq!(page.select_project(1).unwrap(), Some(1));
        assert_eq!(page.select_project(2).unwrap(), Some(2));
        assert_eq!(page.select_project(2).unwrap(), None);
        assert!(page.select_project(4).is_err());
    }

    #[test]
    fn test_snapshot_skill_bars() {
        let (clock, _viewport, page) = setup();
        page.navigate("skills").unwrap();
        let revealed_at = page.section("skills").unwrap().revealed_at().unwrap();

        let snap = page.snapshot(revealed_at + 400);
        let skills = snap.sections.iter().find(|s| s.id == "skills").unwrap();
        assert_eq!(skills.bars.len(), 13);
        assert!(skills.bars.iter().all(|b| b.width == 0));

        clock.advance(5000);
        let snap = page.snapshot(clock.now_ms());
        let skills = snap.sections.iter().find(|s| s.id == "skills").unwrap();
        assert_eq!(skills.bars[0].width, 80);
        assert_eq!(skills.bars[7].name, "Problem-Solving");
        assert_eq!(skills.bars[12].width, 85);
    }

    #[test]
    fn test_snapshot_expanded_project() {
        let (_clock, _viewport, page) = setup();
        page.select_project(0).unwrap();
        let snap = page.snapshot(0);
        let projects = snap.sections.iter().find(|s| s.id == "projects").unwrap();
        assert!(projects.items[0].selected);
        assert!(projects.items[0].detail.starts_with("Drag-and-drop"));
        assert!(!projects.items[1].selected);
    }

    #[test]
    fn test_footer_year() {
        let (_clock, _viewport, page) = setup();
        let year = Page::footer_year();
        assert!(year >= 2024);
        assert!(page.footer_text().contains(&year.to_string()));
    }

    #[test]
    fn test_unmount_releases_all_sensors() {
        let (_clock, viewport, page) = setup();
        assert!(viewport.active_observers() > 0);
        page.unmount();
        assert_eq!(viewport.active_observers(), 0);
    }

    #[test]
    fn test_no_visibility_reveals_everything() {
        let clock = ManualClock::new();
        let viewport = ScrollViewport::new(720);
        let platform = Platform::new(Rc::new(clock.clone()), None);
        let page = Page::mount(
            PageContent::default(),
            PageConfig::default(),
            &platform,
            viewport,
        )
        .unwrap();
        assert!(page.sections().iter().all(SectionHandle::is_revealed));
    }
}
