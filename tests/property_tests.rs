//! Property-Based Tests
//!
//! Tests using property-based testing (proptest) to verify recurrence and aggregation
//! invariants:
//! - One-off reminders match exactly their own day
//! - Daily intervals match exactly every N-th day
//! - Nothing is due after a series has ended
//! - Expansion and aggregation are repeatable
//! - Equal times keep events-then-reminders input order
//! - Invalid rules never leak into, or disturb, a schedule

use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Utc};
use daybook_mcp::schedule::{
    DayOptions, DayWindow, Event, ItemKind, Reminder, Repeat, RepeatKind, RepeatRule, build_day,
    occurrences, occurs_on,
};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn base() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
}

fn day(offset: i64) -> NaiveDate {
    base() + TimeDelta::days(offset)
}

fn instant(day_offset: i64, second_of_day: i64) -> NaiveDateTime {
    day(day_offset).and_hms_opt(0, 0, 0).unwrap() + TimeDelta::seconds(second_of_day)
}

fn window(offset: i64) -> DayWindow {
    DayWindow::for_date(day(offset))
}

fn kind_strategy() -> impl Strategy<Value = RepeatKind> {
    prop_oneof![
        Just(RepeatKind::daily),
        Just(RepeatKind::weekly),
        Just(RepeatKind::monthly),
        Just(RepeatKind::yearly),
    ]
}

fn stamp(t: NaiveDateTime) -> String {
    t.format("%Y-%m-%dT%H:%M:%S").to_string()
}

// ============================================================================
// Recurrence Properties
// ============================================================================

/// Property: a one-off reminder is due on its anchor's day and on no other day
#[test]
fn proptest_no_repeat_membership() {
    proptest!(|(anchor_day in -20000i64..20000, secs in 0i64..86400, query in -20000i64..20000)| {
        let anchor = instant(anchor_day, secs);
        let due = occurs_on(anchor, &Repeat::NoRepeat, &window(query));
        prop_assert_eq!(due, query == anchor_day);
    });
}

/// Property: daily every N matches exactly anchor + k*N days
#[test]
fn proptest_daily_interval() {
    proptest!(|(anchor_day in -5000i64..5000, secs in 0i64..86400, n in 1i64..60, delta in -400i64..4000)| {
        let anchor = instant(anchor_day, secs);
        let repeat = Repeat::from(RepeatRule::new(RepeatKind::daily, n).unwrap());
        let due = occurs_on(anchor, &repeat, &window(anchor_day + delta));
        prop_assert_eq!(due, delta >= 0 && delta % n == 0);
    });
}

/// Property: weekly every N matches exactly anchor + k*7N days
#[test]
fn proptest_weekly_interval() {
    proptest!(|(anchor_day in -5000i64..5000, n in 1i64..10, delta in 0i64..2000)| {
        let anchor = instant(anchor_day, 3600);
        let repeat = Repeat::from(RepeatRule::new(RepeatKind::weekly, n).unwrap());
        let due = occurs_on(anchor, &repeat, &window(anchor_day + delta));
        prop_assert_eq!(due, delta % (7 * n) == 0);
    });
}

/// Property: no window starting after the end date has an occurrence
#[test]
fn proptest_end_date_exclusion() {
    proptest!(|(
        kind in kind_strategy(),
        n in 1i64..12,
        anchor_day in -5000i64..5000,
        secs in 0i64..86400,
        end_after in 0i64..3000,
        end_secs in 0i64..86400,
        past_end in 1i64..3000
    )| {
        let anchor = instant(anchor_day, secs);
        let end = instant(anchor_day + end_after, end_secs);
        let repeat = Repeat::from(RepeatRule::new(kind, n).unwrap().until(end));
        prop_assert!(!occurs_on(anchor, &repeat, &window(anchor_day + end_after + past_end)));
    });
}

/// Property: the walk agrees with the occurrence series, so no date is skipped or doubled
#[test]
fn proptest_walk_matches_series() {
    proptest!(|(
        kind in kind_strategy(),
        n in 1i64..13,
        anchor_day in -20000i64..20000,
        secs in 0i64..86400,
        pick in 0usize..1000
    )| {
        let anchor = instant(anchor_day, secs);
        let repeat = Repeat::from(RepeatRule::new(kind, n).unwrap());
        let series: Vec<NaiveDateTime> = occurrences(anchor, &repeat).take(30).collect();
        let dates: BTreeSet<NaiveDate> = series.iter().map(|at| at.date()).collect();

        // Strictly increasing dates
        prop_assert_eq!(dates.len(), series.len());
        prop_assert!(series.windows(2).all(|w| w[0] < w[1]));

        // Any day between the first and last occurrence
        let first = series[0].date();
        let last = series[series.len() - 1].date();
        let span = (last - first).num_days();
        let query = first + TimeDelta::days(pick as i64 % (span + 1));
        let due = occurs_on(anchor, &repeat, &DayWindow::for_date(query));
        prop_assert_eq!(due, dates.contains(&query));
    });
}

/// Property: the same question always gets the same answer
#[test]
fn proptest_occurs_on_idempotent() {
    proptest!(|(kind in kind_strategy(), n in 1i64..12, anchor_day in -5000i64..5000, query in -5000i64..8000)| {
        let anchor = instant(anchor_day, 0);
        let repeat = Repeat::from(RepeatRule::new(kind, n).unwrap());
        let w = window(query);
        prop_assert_eq!(occurs_on(anchor, &repeat, &w), occurs_on(anchor, &repeat, &w));
    });
}

// ============================================================================
// Aggregation Properties
// ============================================================================

/// Property: equal times keep events first, each kind in input order, across calls
#[test]
fn proptest_stable_schedule_order() {
    proptest!(|(
        event_slots in prop::collection::vec(0u32..4, 0..8),
        reminder_slots in prop::collection::vec(0u32..4, 0..8)
    )| {
        let on = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let slot = |s: u32| on.and_hms_opt(9 + s, 0, 0).unwrap();

        let events: Vec<Event> = event_slots
            .iter()
            .enumerate()
            .map(|(i, s)| Event::new(format!("e{i}"), "Event", stamp(slot(*s))))
            .collect();
        let reminders: Vec<Reminder> = reminder_slots
            .iter()
            .enumerate()
            .map(|(i, s)| Reminder::new(format!("r{i}"), "Reminder", stamp(slot(*s))))
            .collect();

        let rank = |kind: ItemKind, id: &str| -> usize {
            let index: usize = id[1..].parse().unwrap();
            match kind {
                ItemKind::event => index,
                ItemKind::reminder => events.len() + index,
            }
        };

        let plan = build_day(on, &Utc, &events, &reminders, &[], &DayOptions::default());
        prop_assert_eq!(plan.schedule.len(), events.len() + reminders.len());
        for pair in plan.schedule.windows(2) {
            prop_assert!(pair[0].time <= pair[1].time);
            if pair[0].time == pair[1].time {
                prop_assert!(rank(pair[0].kind, &pair[0].id) < rank(pair[1].kind, &pair[1].id));
            }
        }

        let again = build_day(on, &Utc, &events, &reminders, &[], &DayOptions::default());
        prop_assert_eq!(plan, again);
    });
}

/// Property: a reminder with interval below 1 never shows up and changes nothing else
#[test]
fn proptest_invalid_rule_isolation() {
    proptest!(|(
        valid in prop::collection::vec((kind_strategy(), 1i64..5, 0i64..60), 0..6),
        bad_interval in -5i64..1,
        bad_kind in kind_strategy(),
        query in 0i64..120
    )| {
        let kind_name = |k: RepeatKind| format!("{:?}", k);
        let on = day(query);

        let mut reminders: Vec<Reminder> = valid
            .iter()
            .enumerate()
            .map(|(i, (kind, n, start))| {
                Reminder::new(format!("ok{i}"), "Valid", stamp(instant(*start, 8 * 3600)))
                    .repeating(kind_name(*kind), *n)
            })
            .collect();
        let clean = build_day(on, &Utc, &[], &reminders, &[], &DayOptions::default());

        reminders.insert(
            0,
            Reminder::new("bad", "Invalid", stamp(instant(0, 8 * 3600)))
                .repeating(kind_name(bad_kind), bad_interval),
        );
        let mixed = build_day(on, &Utc, &[], &reminders, &[], &DayOptions::default());

        prop_assert!(mixed.schedule.iter().all(|item| item.id != "bad"));
        prop_assert_eq!(&mixed.schedule, &clean.schedule);
        prop_assert_eq!(mixed.diagnostics.len(), 1);
        prop_assert_eq!(mixed.diagnostics[0].record_id.as_str(), "bad");
    });
}
