//! Recurrence expansion for reminders
//!
//! Decides whether a reminder anchored at some instant, optionally repeating on a
//! daily/weekly/monthly/yearly cadence, is due on a given calendar day.
//!
//! Every occurrence is computed from the anchor (`anchor + k * interval` units), never
//! by chaining the previous occurrence. Month and year steps use calendar arithmetic:
//! a day that does not exist in the target month is clamped to that month's last day.
//! An anchor on Jan 31 therefore repeats monthly on Feb 28 (29 in leap years), Mar 31,
//! Apr 30 and so on, and an anchor on Feb 29 repeats yearly on Feb 28 in common years.

use crate::error::RecordError;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::num::NonZeroU32;
use std::str::FromStr;

use super::timestamp::end_of_day_time;

/// Calendar unit a repeating reminder steps by
///
/// Uses snake_case naming to match the stored `repeat_type` values.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepeatKind {
    /// Every N days
    daily,
    /// Every N weeks (7 * N days)
    weekly,
    /// Every N calendar months
    monthly,
    /// Every N calendar years
    yearly,
}

impl RepeatKind {
    /// Unit name used in descriptions ("day", "week", ...)
    pub fn unit(self) -> &'static str {
        match self {
            RepeatKind::daily => "day",
            RepeatKind::weekly => "week",
            RepeatKind::monthly => "month",
            RepeatKind::yearly => "year",
        }
    }
}

impl FromStr for RepeatKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(RepeatKind::daily),
            "weekly" => Ok(RepeatKind::weekly),
            "monthly" => Ok(RepeatKind::monthly),
            "yearly" => Ok(RepeatKind::yearly),
            _ => Err(RecordError::InvalidRule(format!(
                "unknown repeat kind '{}'. Valid kinds are: daily, weekly, monthly, yearly",
                s
            ))),
        }
    }
}

/// A validated repeat rule
///
/// The interval is non-zero by construction, so expanding a rule always moves forward.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepeatRule {
    kind: RepeatKind,
    interval: NonZeroU32,
    end_date: Option<NaiveDateTime>,
    count: Option<u32>,
}

impl RepeatRule {
    /// Build a rule, rejecting intervals below 1
    pub fn new(kind: RepeatKind, interval: i64) -> Result<Self, RecordError> {
        let interval = u32::try_from(interval)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(|| {
                RecordError::InvalidRule(format!("interval must be at least 1, got {}", interval))
            })?;

        Ok(Self {
            kind,
            interval,
            end_date: None,
            count: None,
        })
    }

    /// No occurrence strictly after `end_date`
    pub fn until(mut self, end_date: NaiveDateTime) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// At most `count` occurrences, the anchor included
    pub fn times(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn kind(&self) -> RepeatKind {
        self.kind
    }

    pub fn interval(&self) -> u32 {
        self.interval.get()
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    pub fn count(&self) -> Option<u32> {
        self.count
    }

    /// The k-th occurrence of the series, ignoring `end_date` and `count`
    ///
    /// Returns `None` when the arithmetic leaves chrono's representable range.
    fn nth_from(&self, anchor: NaiveDateTime, k: u64) -> Option<NaiveDateTime> {
        let steps = k.checked_mul(u64::from(self.interval.get()))?;
        match self.kind {
            RepeatKind::daily => add_days(anchor, steps),
            RepeatKind::weekly => add_days(anchor, steps.checked_mul(7)?),
            RepeatKind::monthly => add_months(anchor, steps),
            RepeatKind::yearly => add_months(anchor, steps.checked_mul(12)?),
        }
    }

    /// Whether occurrence `k` at `at` is still inside the series bounds
    fn admits(&self, k: u64, at: NaiveDateTime) -> bool {
        let within_count = self.count.is_none_or(|count| k < u64::from(count));
        let within_end = self.end_date.is_none_or(|end| at <= end);
        within_count && within_end
    }

    /// A lower bound on the index of the first occurrence dated on or after `target`
    ///
    /// Backed off by one step so the walk that follows never starts past the target.
    fn index_near(&self, anchor: NaiveDate, target: NaiveDate) -> u64 {
        let units = match self.kind {
            RepeatKind::daily => (target - anchor).num_days(),
            RepeatKind::weekly => (target - anchor).num_days() / 7,
            RepeatKind::monthly => months_between(anchor, target),
            RepeatKind::yearly => months_between(anchor, target) / 12,
        };
        let k = units / i64::from(self.interval.get()) - 1;
        u64::try_from(k).unwrap_or(0)
    }
}

fn add_days(anchor: NaiveDateTime, days: u64) -> Option<NaiveDateTime> {
    let delta = TimeDelta::try_days(i64::try_from(days).ok()?)?;
    anchor.checked_add_signed(delta)
}

fn add_months(anchor: NaiveDateTime, months: u64) -> Option<NaiveDateTime> {
    anchor.checked_add_months(Months::new(u32::try_from(months).ok()?))
}

fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let years = i64::from(to.year()) - i64::from(from.year());
    let months = i64::from(to.month0()) - i64::from(from.month0());
    years * 12 + months
}

/// Repeat configuration of a reminder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Repeat {
    /// Exactly one occurrence, at the anchor
    #[default]
    NoRepeat,
    /// A repeating series starting at the anchor
    Every(RepeatRule),
}

impl Repeat {
    pub fn is_repeating(&self) -> bool {
        matches!(self, Repeat::Every(_))
    }
}

impl From<RepeatRule> for Repeat {
    fn from(rule: RepeatRule) -> Self {
        Repeat::Every(rule)
    }
}

/// One calendar day, `[00:00:00.000, 23:59:59.999]`, inclusive on both ends
///
/// Membership goes by calendar date, so instants with sub-millisecond precision past
/// `end()` still belong to the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DayWindow {
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            start: date.and_time(chrono::NaiveTime::MIN),
            end: date.and_time(end_of_day_time()),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date()
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        instant.date() == self.date()
    }
}

/// Does the reminder have an occurrence on the window's day?
pub fn occurs_on(anchor: NaiveDateTime, repeat: &Repeat, window: &DayWindow) -> bool {
    occurrence_on(anchor, repeat, window).is_some()
}

/// The reminder's occurrence on the window's day, if it has one
///
/// For a repeating rule this is the anchor's time-of-day carried onto the window's date
/// (or the clamped month end for month/year steps).
pub fn occurrence_on(
    anchor: NaiveDateTime,
    repeat: &Repeat,
    window: &DayWindow,
) -> Option<NaiveDateTime> {
    let rule = match repeat {
        Repeat::NoRepeat => return window.contains(anchor).then_some(anchor),
        Repeat::Every(rule) => rule,
    };

    // Series not started yet, or already over
    if anchor.date() > window.date() {
        return None;
    }
    if rule.end_date.is_some_and(|end| end < window.start()) {
        return None;
    }

    let day = window.date();
    let mut k = rule.index_near(anchor.date(), day);
    loop {
        let at = rule.nth_from(anchor, k)?;
        if !rule.admits(k, at) {
            return None;
        }
        match at.date().cmp(&day) {
            Ordering::Less => k += 1,
            Ordering::Equal => return Some(at),
            Ordering::Greater => return None,
        }
    }
}

/// First occurrence strictly after `after`
pub fn next_occurrence(
    anchor: NaiveDateTime,
    repeat: &Repeat,
    after: NaiveDateTime,
) -> Option<NaiveDateTime> {
    let start = match repeat {
        Repeat::NoRepeat => 0,
        Repeat::Every(rule) => rule.index_near(anchor.date(), after.date()),
    };
    Occurrences::starting_at(anchor, repeat, start).find(|at| *at > after)
}

/// All occurrences of a reminder in ascending order
pub fn occurrences(anchor: NaiveDateTime, repeat: &Repeat) -> Occurrences<'_> {
    Occurrences::starting_at(anchor, repeat, 0)
}

/// Iterator over a reminder's occurrences, bounded by `end_date` and `count`
///
/// Unbounded rules produce an unbounded iterator; pair it with `take` or `take_while`.
#[derive(Debug, Clone)]
pub struct Occurrences<'a> {
    anchor: NaiveDateTime,
    repeat: &'a Repeat,
    index: u64,
    finished: bool,
}

impl<'a> Occurrences<'a> {
    fn starting_at(anchor: NaiveDateTime, repeat: &'a Repeat, index: u64) -> Self {
        Self {
            anchor,
            repeat,
            index,
            finished: false,
        }
    }
}

impl Iterator for Occurrences<'_> {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let next = match self.repeat {
            Repeat::NoRepeat => (self.index == 0).then_some(self.anchor),
            Repeat::Every(rule) => rule
                .nth_from(self.anchor, self.index)
                .filter(|at| rule.admits(self.index, *at)),
        };

        match next {
            Some(at) => {
                self.index += 1;
                Some(at)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}
