//! Property tests for the reveal coordinator.

use std::cell::Cell;
use std::rc::Rc;

use proptest::prelude::*;

use spark_folio::{
    section, stagger_delay, target_width_percent, FolioError, ManualClock, MockAction, Notifier,
    Platform, ProgressConfig, ProgressDriver, Rect, ScrollViewport, SectionConfig, SectionProps,
    SkillLevel, Threshold, Timers,
};

fn scroll_steps() -> impl Strategy<Value = Vec<(u32, u64)>> {
    prop::collection::vec((0u32..4000, 0u64..2000), 1..40)
}

#[test]
fn reveal_is_monotonic() {
    proptest!(|(steps in scroll_steps(), threshold in 0.0f32..=1.0)| {
        let clock = ManualClock::new();
        let viewport = ScrollViewport::new(600);
        viewport.place("top", Rect::new(0, 1500));
        viewport.place("section", Rect::new(1500, 900));
        viewport.place("bottom", Rect::new(2400, 1600));

        let handle = section(
            SectionProps {
                id: "section".to_string(),
                config: SectionConfig {
                    threshold: Threshold::new(threshold).unwrap(),
                    ..SectionConfig::default()
                },
                items: 3,
                strict: true,
                ..Default::default()
            },
            &Platform::manual(&clock, &viewport),
        )
        .unwrap();

        let mut first_seen = None;
        for (y, dt) in steps {
            clock.advance(dt);
            viewport.set_scroll(y);
            match (first_seen, handle.revealed_at()) {
                (None, at) => first_seen = at,
                (Some(prev), at) => {
                    prop_assert_eq!(at, Some(prev));
                    prop_assert!(handle.is_revealed());
                }
            }
        }
    });
}

#[test]
fn stagger_delay_non_decreasing() {
    proptest!(|(base in 0u64..100_000, step in 0u64..10_000, index in 0usize..10_000)| {
        let here = stagger_delay(index, base, step);
        prop_assert!(here >= base);
        prop_assert!(stagger_delay(index + 1, base, step) >= here);
    });
}

#[test]
fn progress_gated_by_reveal_and_delay() {
    proptest!(|(
        levels in prop::collection::vec(0i64..=100, 1..14),
        reveal_at in 0u64..20_000,
        probe in 0u64..30_000,
    )| {
        let clock = ManualClock::new();
        let timers: Rc<dyn Timers> = Rc::new(clock.clone());
        let config = ProgressConfig::default();
        let driver = ProgressDriver::new(
            &config,
            levels.iter().map(|l| SkillLevel::new(*l).unwrap()),
        );
        let alive = Rc::new(Cell::new(true));

        // Nothing moves before the reveal
        clock.advance_to(reveal_at);
        for bar in driver.bars() {
            prop_assert_eq!(bar.width_at(reveal_at), 0);
        }

        driver.arm(&timers, &alive);
        let now = reveal_at + probe;
        clock.advance_to(now);
        for bar in driver.bars() {
            let due = reveal_at + driver.plan().delay(bar.index());
            if now <= due {
                prop_assert_eq!(bar.width_at(now), 0);
            }
            prop_assert!(bar.width_at(now) <= bar.level().percent());
        }
    });
}

#[test]
fn at_most_one_run_in_flight() {
    proptest!(|(
        latency in 1u64..5000,
        ops in prop::collection::vec(0u64..3000, 1..50),
    )| {
        let clock = ManualClock::new();
        let timers: Rc<dyn Timers> = Rc::new(clock.clone());
        let notifier = Notifier::new(timers.clone(), 5000);
        let action = MockAction::new("submit", latency, timers, notifier);

        let mut accepted = Vec::new();
        for wait in ops {
            clock.advance(wait);
            let now = clock.now_ms();
            let in_flight = accepted.iter().any(|(start, due)| *start <= now && now < *due);
            prop_assert_eq!(action.is_busy(), in_flight);

            match action.trigger() {
                Ok(ticket) => {
                    prop_assert!(!in_flight);
                    accepted.push((ticket.started_at, ticket.due_at));
                }
                Err(FolioError::DuplicateTrigger { .. }) => prop_assert!(in_flight),
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }

        // Accepted runs never overlap
        for pair in accepted.windows(2) {
            prop_assert!(pair[0].1 <= pair[1].0);
        }
    });
}

#[test]
fn target_width_matches_level() {
    proptest!(|(level in -1000i64..1000)| {
        match target_width_percent(level) {
            Ok(width) => {
                prop_assert!((0..=100).contains(&level));
                prop_assert_eq!(width as i64, level);
            }
            Err(FolioError::Validation { field, .. }) => {
                prop_assert_eq!(field, "level");
                prop_assert!(!(0..=100).contains(&level));
            }
            Err(other) => prop_assert!(false, "unexpected error {other}"),
        }
    });
}

#[test]
fn threshold_domain() {
    proptest!(|(ratio in -2.0f32..2.0)| {
        prop_assert_eq!(Threshold::new(ratio).is_ok(), (0.0..=1.0).contains(&ratio));
    });
}
