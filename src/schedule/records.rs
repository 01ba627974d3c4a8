use chrono::{NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer, Serialize};

use super::recurrence::{Repeat, RepeatKind, RepeatRule};
use super::timestamp::{parse_end_bound, parse_timestamp};
use crate::error::RecordError;

/// A reminder as delivered by storage
///
/// Repeat settings arrive as a loose bag of optional columns; [`Reminder::repeat`]
/// turns them into a validated [`Repeat`]. Timestamps stay raw strings until a day is
/// built, so one malformed value only excludes its own record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Unique identifier
    pub id: String,
    /// Title shown in the schedule
    pub title: String,
    /// First (reference) occurrence
    #[serde(alias = "remind_at")]
    pub anchor_time: String,
    /// daily, weekly, monthly or yearly; absent or empty for a one-off reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_type: Option<String>,
    /// Every N units; defaults to 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_interval: Option<StoredNumber>,
    /// No occurrence strictly after this instant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_end_date: Option<String>,
    /// Cap on the number of occurrences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat_count: Option<StoredNumber>,
    /// Calendar event this reminder belongs to
    #[serde(default, alias = "event_id", skip_serializing_if = "Option::is_none")]
    pub linked_event_id: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Reminder {
    /// Create a one-off, open reminder
    pub fn new(id: impl Into<String>, title: impl Into<String>, anchor_time: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            anchor_time: anchor_time.into(),
            repeat_type: None,
            repeat_interval: None,
            repeat_end_date: None,
            repeat_count: None,
            linked_event_id: None,
            is_completed: false,
        }
    }

    /// Set the repeat kind and interval (kept raw, validated by [`Reminder::repeat`])
    pub fn repeating(mut self, kind: impl Into<String>, interval: i64) -> Self {
        self.repeat_type = Some(kind.into());
        self.repeat_interval = Some(interval.into());
        self
    }

    pub fn until(mut self, end_date: impl Into<String>) -> Self {
        self.repeat_end_date = Some(end_date.into());
        self
    }

    pub fn anchor<Tz: TimeZone>(&self, tz: &Tz) -> Result<NaiveDateTime, RecordError> {
        parse_timestamp(&self.anchor_time, tz, "anchor_time")
    }

    /// Validated repeat configuration
    ///
    /// # Errors
    /// `InvalidRule` for an unknown kind or an interval below 1,
    /// `MalformedTimestamp` for an unreadable end date.
    pub fn repeat<Tz: TimeZone>(&self, tz: &Tz) -> Result<Repeat, RecordError> {
        let kind = match self.repeat_type.as_deref().map(str::trim) {
            None | Some("") => return Ok(Repeat::NoRepeat),
            Some(kind) => kind.parse::<RepeatKind>()?,
        };

        let interval = match self.repeat_interval {
            Some(ref interval) => interval.whole("repeat_interval")?,
            None => 1,
        };
        let mut rule = RepeatRule::new(kind, interval)?;
        if let Some(ref end) = self.repeat_end_date {
            rule = rule.until(parse_end_bound(end, tz, "repeat_end_date")?);
        }
        if let Some(ref count) = self.repeat_count {
            let raw = count.whole("repeat_count")?;
            let count = u32::try_from(raw).map_err(|_| {
                RecordError::InvalidRule(format!("repeat_count must not be negative, got {}", raw))
            })?;
            rule = rule.times(count);
        }
        Ok(Repeat::Every(rule))
    }
}

/// A numeric repeat setting as stored
///
/// Any stored value is accepted on load; [`Reminder::repeat`] rejects anything that is
/// not a whole number, so one bad value only excludes its own reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum StoredNumber {
    Int(i64),
    Text(String),
}

impl StoredNumber {
    fn whole(&self, field: &str) -> Result<i64, RecordError> {
        match self {
            StoredNumber::Int(n) => Ok(*n),
            StoredNumber::Text(text) => text.trim().parse().map_err(|_| {
                RecordError::InvalidRule(format!("{} must be a whole number, got {:?}", field, text))
            }),
        }
    }
}

impl From<i64> for StoredNumber {
    fn from(n: i64) -> Self {
        StoredNumber::Int(n)
    }
}

impl<'de> Deserialize<'de> for StoredNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match toml::Value::deserialize(deserializer)? {
            toml::Value::Integer(n) => StoredNumber::Int(n),
            toml::Value::String(text) => StoredNumber::Text(text),
            other => StoredNumber::Text(other.to_string()),
        })
    }
}

/// A single-occurrence calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub start_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Event {
    pub fn new(id: impl Into<String>, title: impl Into<String>, start_at: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_at: start_at.into(),
            end_at: None,
            location: None,
            notes: None,
        }
    }
}

/// Todo status
///
/// Uses snake_case naming to match the stored values.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TodoStatus {
    #[default]
    pending,
    completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_at: Option<String>,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Todo {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due_at: None,
            status: TodoStatus::pending,
            priority: None,
            tags: Vec::new(),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == TodoStatus::pending
    }
}

/// Everything the record source holds for one user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub reminders: Vec<Reminder>,
    pub events: Vec<Event>,
    pub todos: Vec<Todo>,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn find_reminder(&self, id: &str) -> Option<&Reminder> {
        self.reminders.iter().find(|r| r.id == id)
    }
}
