//! Schedule domain: records, recurrence expansion and daily aggregation
//!
//! Submodules:
//! - `records`: reminder, event and todo records as storage delivers them
//! - `recurrence`: whether a (possibly repeating) reminder is due on a day
//! - `aggregate`: merges a day's events and reminders into one ordered schedule
//! - `timestamp`: reads stored timestamps into the reference calendar
//!
//! Everything here is pure: no I/O, no clock. "Today" is always passed in.

mod aggregate;
mod records;
mod recurrence;
mod timestamp;

pub use aggregate::{
    DayOptions, DayPlan, ItemKind, ScheduleItem, TaskScope, build_agenda, build_day,
    upcoming_events,
};
pub use records::{Event, Records, Reminder, StoredNumber, Todo, TodoStatus};
pub use recurrence::{
    DayWindow, Occurrences, Repeat, RepeatKind, RepeatRule, next_occurrence, occurrence_on,
    occurrences, occurs_on,
};
pub use timestamp::{end_of_day_time, parse_end_bound, parse_timestamp};
