//! Daybook MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server that answers "what is on
//! my plate today?". It expands one-off and repeating reminders (daily, weekly, monthly,
//! yearly, with interval, end date and count bounds) for a calendar day and merges them
//! with that day's events into one time-ordered schedule, next to the pending todos.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `DaybookServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `schedule` module - Recurrence expansion and daily aggregation,
//!   pure functions with the reference date and time zone passed in
//! - **Persistence Layer**: `storage` module - Read-only TOML record source
//!
//! # Example
//!
//! ```no_run
//! use daybook_mcp::{DayOptions, DaybookServerHandler, ReferenceZone};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler =
//!         DaybookServerHandler::new("daybook.toml", ReferenceZone::Local, DayOptions::default())?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```
//!
//! The domain layer can be used on its own:
//!
//! ```
//! use chrono::{NaiveDate, Utc};
//! use daybook_mcp::schedule::{build_day, DayOptions, Event, Reminder};
//!
//! let events = vec![Event::new("standup", "Standup", "2026-01-05T10:00:00")];
//! let reminders = vec![Reminder::new("pills", "Pills", "2026-01-01T08:00:00").repeating("daily", 1)];
//! let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
//!
//! let plan = build_day(date, &Utc, &events, &reminders, &[], &DayOptions::default());
//! let ids: Vec<_> = plan.schedule.iter().map(|item| item.id.as_str()).collect();
//! assert_eq!(ids, ["pills", "standup"]);
//! ```

pub mod error;
pub mod formatting;
pub mod handlers;
pub mod reference;
pub mod schedule;
pub mod storage;
pub mod validation;

use anyhow::Result;
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};

// Re-export commonly used types
pub use error::{Diagnostic, RecordError, RecordKind};
pub use reference::ReferenceZone;
pub use schedule::{DayOptions, DayPlan, Event, Records, Reminder, ScheduleItem, TaskScope, Todo};
pub use storage::Storage;

/// MCP Server handler for the daily schedule
///
/// Holds one user's records, loaded once at start-up, and the reference calendar in
/// which days are built. Records are never modified.
pub struct DaybookServerHandler {
    pub(crate) records: Records,
    pub(crate) zone: ReferenceZone,
    pub(crate) options: DayOptions,
}

impl DaybookServerHandler {
    /// Create a new handler from a data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (TOML format)
    /// * `zone` - Reference calendar for "today" and for timestamps with offsets
    /// * `options` - Day plan options
    ///
    /// # Returns
    /// Result containing the handler or an error
    pub fn new(storage_path: &str, zone: ReferenceZone, options: DayOptions) -> Result<Self> {
        let records = Storage::new(storage_path).load()?;
        Ok(Self::from_records(records, zone, options))
    }

    /// Create a handler over records already in memory
    pub fn from_records(records: Records, zone: ReferenceZone, options: DayOptions) -> Self {
        Self {
            records,
            zone,
            options,
        }
    }

    pub fn records(&self) -> &Records {
        &self.records
    }
}

/// Daily schedule server for a personal productivity tool.
///
/// Reminders may be one-off or repeat daily, weekly, monthly or yearly, every N units,
/// optionally until an end date or for a fixed number of times. For any day the server
/// works out which reminders are due, merges them with that day's calendar events into
/// one schedule sorted by time, and lists pending todos.
///
/// Key concepts:
/// - **schedule**: events and reminder occurrences of one day, earliest first
/// - **tasks**: pending todos
/// - **skipped records**: records that could not be read (bad repeat rule or timestamp);
///   they are reported and left out, everything else is still shown
///
/// Dates use format: YYYY-MM-DD. Omitted dates mean today.
#[mcp_server]
impl McpServer for DaybookServerHandler {
    /// **Today**: Show the schedule (events + due reminders, sorted by time) and pending tasks for one day.
    /// **Use**: Start here. Omit date for today.
    #[tool]
    async fn today(
        &self,
        /// Date: YYYY-MM-DD (optional, default today)
        date: Option<String>,
    ) -> McpResult<String> {
        self.handle_today(date).await
    }

    /// **Check reminder**: Tell whether one reminder is due on a date, how it repeats, and when it is next due.
    #[tool]
    async fn occurs(
        &self,
        /// Reminder ID
        reminder_id: String,
        /// Date: YYYY-MM-DD
        date: String,
    ) -> McpResult<String> {
        self.handle_occurs(reminder_id, date).await
    }

    /// **Agenda**: Show the schedule for several consecutive days, then the next events after them.
    /// **Use**: Weekly review. Default 7 days, max 31.
    #[tool]
    async fn agenda(
        &self,
        /// First day: YYYY-MM-DD (optional, default today)
        start: Option<String>,
        /// Number of days (optional, default 7)
        days: Option<u32>,
    ) -> McpResult<String> {
        self.handle_agenda(start, days).await
    }
}
