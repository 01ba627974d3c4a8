//! Daily aggregation of events, reminders and todos
//!
//! Builds the schedule for one calendar day: same-day events plus every open reminder
//! with an occurrence on that day, merged into one list sorted by time. Pending todos
//! are surfaced separately. Records that cannot be read are left out and reported as
//! diagnostics; they never prevent the rest of the day from being built.

use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, warn};

use super::records::{Event, Records, Reminder, Todo};
use super::recurrence::{DayWindow, occurrence_on};
use super::timestamp::parse_timestamp;
use crate::error::{Diagnostic, RecordError, RecordKind};

/// Source of a schedule item
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    event,
    reminder,
}

/// One time-sortable entry of a day's schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleItem {
    pub id: String,
    pub kind: ItemKind,
    pub title: String,
    /// Event start, or the reminder's occurrence on the day
    pub time: NaiveDateTime,
    /// Events only
    pub end_time: Option<NaiveDateTime>,
    /// Events only
    pub location: Option<String>,
    /// Events only
    pub notes: Option<String>,
}

/// Which pending todos a day plan lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskScope {
    /// Every pending todo, whatever its due date
    #[default]
    AllPending,
    /// Pending todos due within the day
    DueToday,
    /// Pending todos without a due date or due by the end of the day
    Outstanding,
}

impl FromStr for TaskScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.replace('-', "_").as_str() {
            "all_pending" => Ok(TaskScope::AllPending),
            "due_today" => Ok(TaskScope::DueToday),
            "outstanding" => Ok(TaskScope::Outstanding),
            _ => Err(format!(
                "Invalid task scope '{}'. Valid options are: all-pending, due-today, outstanding",
                s
            )),
        }
    }
}

/// Options for building a day plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayOptions {
    pub task_scope: TaskScope,
}

/// Everything due on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Events and reminder occurrences, ascending by time
    pub schedule: Vec<ScheduleItem>,
    pub tasks: Vec<Todo>,
    /// Records left out of this plan and why
    pub diagnostics: Vec<Diagnostic>,
}

/// Build the plan for `date`
///
/// `events`, `reminders` and `todos` may be a user's full record set or any superset of
/// the day; filtering an already filtered set changes nothing. At equal times events come
/// before reminders, and items of the same kind keep their input order.
///
/// # Arguments
/// * `date` - Day to build, in the reference calendar
/// * `tz` - Reference calendar that offset-carrying timestamps are converted into
/// * `options` - Task selection
#[tracing::instrument(level = "debug", skip_all, fields(%date))]
pub fn build_day<Tz: TimeZone>(
    date: NaiveDate,
    tz: &Tz,
    events: &[Event],
    reminders: &[Reminder],
    todos: &[Todo],
    options: &DayOptions,
) -> DayPlan {
    let window = DayWindow::for_date(date);
    let mut diagnostics = Vec::new();
    let mut schedule = Vec::new();

    for event in events {
        match event_item(event, tz, &window) {
            Ok(Some(item)) => schedule.push(item),
            Ok(None) => {}
            Err(error) => diagnostics.push(Diagnostic::new(RecordKind::event, &event.id, error)),
        }
    }

    for reminder in reminders.iter().filter(|r| !r.is_completed) {
        match reminder_item(reminder, tz, &window) {
            Ok(Some(item)) => schedule.push(item),
            Ok(None) => {}
            Err(error) => {
                diagnostics.push(Diagnostic::new(RecordKind::reminder, &reminder.id, error))
            }
        }
    }

    // Stable: ties keep the events-then-reminders order built above
    schedule.sort_by(|a, b| a.time.cmp(&b.time));

    let mut tasks = Vec::new();
    for todo in todos.iter().filter(|t| t.is_pending()) {
        match task_in_scope(todo, tz, &window, options.task_scope) {
            Ok(true) => tasks.push(todo.clone()),
            Ok(false) => {}
            Err(error) => diagnostics.push(Diagnostic::new(RecordKind::todo, &todo.id, error)),
        }
    }

    for diagnostic in &diagnostics {
        warn!(
            record = %diagnostic.record,
            record_id = %diagnostic.record_id,
            error = %diagnostic.error,
            "excluding record from day plan"
        );
    }
    debug!(
        scheduled = schedule.len(),
        tasks = tasks.len(),
        excluded = diagnostics.len(),
        "built day plan"
    );

    DayPlan {
        date,
        schedule,
        tasks,
        diagnostics,
    }
}

/// Build one plan per day for `days` consecutive days starting at `start`
pub fn build_agenda<Tz: TimeZone>(
    start: NaiveDate,
    days: usize,
    tz: &Tz,
    records: &Records,
    options: &DayOptions,
) -> Vec<DayPlan> {
    start
        .iter_days()
        .take(days)
        .map(|date| {
            build_day(
                date,
                tz,
                &records.events,
                &records.reminders,
                &records.todos,
                options,
            )
        })
        .collect()
}

/// Events starting at or after `now`, earliest first, at most `limit`
///
/// Events with unreadable timestamps are skipped and reported.
pub fn upcoming_events<Tz: TimeZone>(
    events: &[Event],
    now: NaiveDateTime,
    limit: usize,
    tz: &Tz,
) -> (Vec<ScheduleItem>, Vec<Diagnostic>) {
    let mut items = Vec::new();
    let mut diagnostics = Vec::new();

    for event in events {
        match event_to_item(event, tz) {
            Ok(item) if item.time >= now => items.push(item),
            Ok(_) => {}
            Err(error) => diagnostics.push(Diagnostic::new(RecordKind::event, &event.id, error)),
        }
    }

    items.sort_by(|a, b| a.time.cmp(&b.time));
    items.truncate(limit);
    (items, diagnostics)
}

fn event_to_item<Tz: TimeZone>(event: &Event, tz: &Tz) -> Result<ScheduleItem, RecordError> {
    let time = parse_timestamp(&event.start_at, tz, "start_at")?;
    let end_time = event
        .end_at
        .as_deref()
        .map(|end| parse_timestamp(end, tz, "end_at"))
        .transpose()?;

    Ok(ScheduleItem {
        id: event.id.clone(),
        kind: ItemKind::event,
        title: event.title.clone(),
        time,
        end_time,
        location: event.location.clone(),
        notes: event.notes.clone(),
    })
}

fn event_item<Tz: TimeZone>(
    event: &Event,
    tz: &Tz,
    window: &DayWindow,
) -> Result<Option<ScheduleItem>, RecordError> {
    let item = event_to_item(event, tz)?;
    Ok(window.contains(item.time).then_some(item))
}

fn reminder_item<Tz: TimeZone>(
    reminder: &Reminder,
    tz: &Tz,
    window: &DayWindow,
) -> Result<Option<ScheduleItem>, RecordError> {
    let anchor = reminder.anchor(tz)?;
    let repeat = reminder.repeat(tz)?;

    Ok(
        occurrence_on(anchor, &repeat, window).map(|time| ScheduleItem {
            id: reminder.id.clone(),
            kind: ItemKind::reminder,
            title: reminder.title.clone(),
            time,
            end_time: None,
            location: None,
            notes: None,
        }),
    )
}

fn task_in_scope<Tz: TimeZone>(
    todo: &Todo,
    tz: &Tz,
    window: &DayWindow,
    scope: TaskScope,
) -> Result<bool, RecordError> {
    let due = todo
        .due_at
        .as_deref()
        .map(|due| parse_timestamp(due, tz, "due_at"))
        .transpose()?;

    Ok(match scope {
        TaskScope::AllPending => true,
        TaskScope::DueToday => due.is_some_and(|due| window.contains(due)),
        TaskScope::Outstanding => due.is_none_or(|due| due.date() <= window.date()),
    })
}
