//! End-to-end scenarios on a manual clock and a scroll viewport.

use std::cell::Cell;
use std::rc::Rc;

use spark_signals::effect;

use spark_folio::{
    section, ActionState, ContactField, FolioError, ManualClock, MockAction, Notifier,
    NotifyKind, Page, PageConfig, PageContent, Platform, ProgressConfig, Rect, ScrollViewport,
    SectionConfig, SectionProps, SkillLevel, Threshold, Timers, VisibilitySource,
};

fn setup() -> (ManualClock, ScrollViewport, Platform) {
    let clock = ManualClock::new();
    let viewport = ScrollViewport::new(800);
    viewport.place("hero", Rect::new(0, 800));
    viewport.place("skills", Rect::new(800, 1200));
    viewport.place("projects", Rect::new(2000, 1000));
    let platform = Platform::manual(&clock, &viewport);
    (clock, viewport, platform)
}

fn observed(id: &str, threshold: f32, items: usize) -> SectionProps {
    SectionProps {
        id: id.to_string(),
        config: SectionConfig {
            threshold: Threshold::new(threshold).unwrap(),
            ..SectionConfig::default()
        },
        items,
        strict: true,
        ..Default::default()
    }
}

fn technical_skills() -> Vec<SkillLevel> {
    [80, 60, 75, 90, 85, 80, 70]
        .into_iter()
        .map(|l| SkillLevel::new(l).unwrap())
        .collect()
}

// =============================================================================
// Reveal
// =============================================================================

#[test]
fn reveal_flips_once_and_stays() {
    let (clock, viewport, platform) = setup();
    let handle = section(observed("projects", 0.2, 4), &platform).unwrap();

    let flips = Rc::new(Cell::new(0));
    let seen = flips.clone();
    let reveal = handle.reveal_state();
    let stop = effect(move || {
        if reveal.is_revealed() {
            seen.set(seen.get() + 1);
        }
    });

    viewport.set_scroll(1500);
    clock.advance(100);
    viewport.scroll_to_top();
    viewport.set_scroll(1500);

    assert!(handle.is_revealed());
    assert_eq!(handle.revealed_at(), Some(0));
    assert_eq!(flips.get(), 1);
    stop();
}

#[test]
fn never_intersecting_section_stays_hidden() {
    let clock = ManualClock::new();
    let viewport = ScrollViewport::new(800);
    viewport.place("top", Rect::new(0, 800));
    // A zero-height root never intersects
    viewport.place("contact", Rect::new(10_000, 0));
    let platform = Platform::manual(&clock, &viewport);

    let handle = section(observed("contact", 0.3, 2), &platform).unwrap();
    for _ in 0..100 {
        clock.advance(60_000);
        viewport.scroll_to_bottom();
    }
    assert!(!handle.is_revealed());
    assert!(handle.item_styles(clock.now_ms()).iter().all(|s| s.opacity() == 0));
}

#[test]
fn partial_visibility_below_threshold_does_not_reveal() {
    let (_clock, viewport, platform) = setup();
    let handle = section(observed("skills", 0.3, 1), &platform).unwrap();

    // 1200 tall, 300 visible = 0.25
    viewport.set_scroll(300);
    assert!(!handle.is_revealed());
    // 360 visible = 0.3
    viewport.set_scroll(360);
    assert!(handle.is_revealed());
}

// =============================================================================
// Progress bars
// =============================================================================

#[test]
fn fourth_technical_skill_starts_at_950ms() {
    let (clock, viewport, platform) = setup();
    let handle = section(
        SectionProps {
            bars: technical_skills(),
            progress: ProgressConfig::default(),
            ..observed("skills", 0.3, 7)
        },
        &platform,
    )
    .unwrap();

    viewport.set_scroll(800);
    assert_eq!(handle.revealed_at(), Some(0));

    let bar = &handle.bars()[3];
    clock.advance(949);
    assert_eq!(bar.width_at(clock.now_ms()), 0);
    assert_eq!(bar.started_at(), None);

    clock.advance(1);
    assert_eq!(bar.started_at(), Some(950));
    assert_eq!(bar.target_width(), 90);

    clock.advance(1000);
    assert_eq!(bar.width_at(clock.now_ms()), 90);
}

#[test]
fn bars_wait_for_late_reveal() {
    let (clock, viewport, platform) = setup();
    let handle = section(
        SectionProps {
            bars: technical_skills(),
            ..observed("skills", 0.3, 7)
        },
        &platform,
    )
    .unwrap();

    clock.advance(30_000);
    assert!(handle.bars().iter().all(|b| b.target_width() == 0));

    viewport.set_scroll(800);
    clock.advance(499);
    assert!(handle.bars().iter().all(|b| b.started_at().is_none()));
    clock.advance(1);
    assert_eq!(handle.bars()[0].started_at(), Some(30_500));
}

// =============================================================================
// Mock actions
// =============================================================================

#[test]
fn contact_submit_busy_window() {
    let clock = ManualClock::new();
    let timers: Rc<dyn Timers> = Rc::new(clock.clone());
    let notifier = Notifier::new(timers.clone(), 5000);
    let submit = MockAction::new("contact_submit", 2000, timers, notifier.clone())
        .with_completion("Message sent successfully! I'll get back to you soon.", NotifyKind::Success);

    submit.trigger().unwrap();
    for t in [0, 1, 1000, 1999] {
        clock.advance_to(t);
        assert!(submit.is_busy(), "busy at {t}");
        assert!(notifier.toasts().is_empty());
    }

    clock.advance_to(2000);
    assert_eq!(submit.state(), ActionState::Idle);
    let toasts = notifier.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].shown_at, 2000);

    // Control is enabled again
    assert!(submit.trigger().is_ok());
}

#[test]
fn second_trigger_while_busy_starts_nothing() {
    let clock = ManualClock::new();
    let timers: Rc<dyn Timers> = Rc::new(clock.clone());
    let notifier = Notifier::new(timers.clone(), 5000);
    let download = MockAction::new("resume_download", 1000, timers, notifier.clone())
        .with_completion("Resume download started!", NotifyKind::Success);

    download.trigger().unwrap();
    let pending = clock.pending();
    assert!(matches!(
        download.trigger(),
        Err(FolioError::DuplicateTrigger { .. })
    ));
    assert_eq!(clock.pending(), pending);

    clock.run_until_idle();
    assert!(notifier.toasts().is_empty(), "toast expired after run_until_idle");
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn unmount_before_sensor_fires_leaves_no_observers() {
    let (_clock, viewport, platform) = setup();
    let handles: Vec<_> = ["skills", "projects"]
        .into_iter()
        .map(|id| section(observed(id, 0.5, 1), &platform).unwrap())
        .collect();
    assert_eq!(viewport.active_observers(), 2);

    drop(handles);
    assert_eq!(viewport.active_observers(), 0);

    // Scrolling afterwards is harmless
    viewport.scroll_to_bottom();
}

#[test]
fn lax_mode_missing_root_does_not_block_others() {
    let (_clock, viewport, platform) = setup();
    let ghost = section(
        SectionProps {
            strict: false,
            ..observed("ghost", 0.3, 1)
        },
        &platform,
    )
    .unwrap();
    let skills = section(observed("skills", 0.3, 1), &platform).unwrap();

    viewport.set_scroll(800);
    assert!(!ghost.is_revealed());
    assert!(skills.is_revealed());
}

#[test]
fn page_collects_section_failures() {
    let clock = ManualClock::new();
    let layout_viewport = ScrollViewport::new(720);

    // Sensors come from a viewport that only knows two of the sections
    let sensors = ScrollViewport::new(720);
    sensors.place("home", Rect::new(0, 760));
    sensors.place("about", Rect::new(760, 520));
    let platform = Platform::new(Rc::new(clock.clone()), Some(Rc::new(sensors)));

    let page = Page::mount(
        PageContent::default(),
        PageConfig {
            strict: true,
            ..PageConfig::default()
        },
        &platform,
        layout_viewport,
    )
    .unwrap();

    assert_eq!(page.sections().len(), 2);
    assert_eq!(page.failures().len(), 5);
    assert!(page
        .failures()
        .iter()
        .all(|(_, e)| matches!(e, FolioError::MissingElement { .. })));
}

#[test]
fn full_page_walkthrough() {
    let clock = ManualClock::new();
    let viewport = ScrollViewport::new(720);
    let page = Page::mount(
        PageContent::default(),
        PageConfig::default(),
        &Platform::manual(&clock, &viewport),
        viewport.clone(),
    )
    .unwrap();

    // Menu nav closes the menu and reveals the target
    page.toggle_menu();
    page.navigate("contact").unwrap();
    assert!(!page.ui().is_menu_open());
    assert!(page.section("contact").unwrap().is_revealed());

    page.set_field(ContactField::Name, "Grace");
    page.set_field(ContactField::Email, "grace@navy.mil");
    page.set_field(ContactField::Subject, "COBOL");
    page.set_field(ContactField::Message, "Hello");
    page.submit_contact().unwrap();
    assert!(page.snapshot(clock.now_ms()).contact_busy);

    clock.advance(2000);
    let snap = page.snapshot(clock.now_ms());
    assert!(!snap.contact_busy);
    assert_eq!(snap.form.name, "");
    assert_eq!(snap.toasts.len(), 1);

    page.unmount();
    assert_eq!(viewport.active_observers(), 0);
}
