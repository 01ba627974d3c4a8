//! Record-level error taxonomy
//!
//! Errors in this module never abort a day's aggregation. Each one is attached to the
//! record that caused it and handed back to the caller as a [`Diagnostic`], while every
//! other record is still scheduled normally.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Why a single record was excluded from a day plan
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordError {
    /// Repeat rule with an unknown kind or an interval below 1
    #[error("invalid repeat rule: {0}")]
    InvalidRule(String),

    /// A timestamp field that could not be read as an instant
    #[error("malformed timestamp in `{field}`: {value:?}")]
    MalformedTimestamp { field: &'static str, value: String },
}

impl RecordError {
    pub(crate) fn malformed(field: &'static str, value: &str) -> Self {
        RecordError::MalformedTimestamp {
            field,
            value: value.to_string(),
        }
    }
}

/// Which collection a diagnosed record came from
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
    event,
    reminder,
    todo,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::event => "event",
            RecordKind::reminder => "reminder",
            RecordKind::todo => "todo",
        };
        f.write_str(name)
    }
}

/// A non-fatal report about one excluded record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub record_id: String,
    pub record: RecordKind,
    pub error: RecordError,
}

impl Diagnostic {
    pub fn new(record: RecordKind, record_id: impl Into<String>, error: RecordError) -> Self {
        Self {
            record_id: record_id.into(),
            record,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.record, self.record_id, self.error)
    }
}
