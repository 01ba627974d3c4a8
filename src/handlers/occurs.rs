//! Occurs handler for the daybook MCP server

use crate::DaybookServerHandler;
use crate::formatting;
use crate::schedule::{DayWindow, next_occurrence, occurrence_on};
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl DaybookServerHandler {
    /// Checks a single reminder against one day and reports its next occurrence.
    pub async fn handle_occurs(&self, reminder_id: String, date: String) -> McpResult<String> {
        let reminder_id = validation::normalize_record_id(&reminder_id);
        let date = validation::parse_date_param(&date)?;

        let reminder = match self.records.find_reminder(&reminder_id) {
            Some(r) => r,
            None => {
                bail_public!(_, "Reminder '{}' not found", reminder_id);
            }
        };

        let (anchor, repeat) = match self.zone.read_reminder(reminder) {
            Ok(read) => read,
            Err(e) => {
                bail_public!(_, "Reminder '{}' cannot be expanded: {}", reminder_id, e);
            }
        };

        let window = DayWindow::for_date(date);
        let mut result = match occurrence_on(anchor, &repeat, &window) {
            Some(at) => format!(
                "Reminder '{}' ({}) is due on {} at {}\n",
                reminder.id,
                reminder.title,
                date,
                formatting::format_time(at)
            ),
            None => format!(
                "Reminder '{}' ({}) is not due on {}\n",
                reminder.id, reminder.title, date
            ),
        };

        if reminder.is_completed {
            result.push_str("  Completed: yes (left out of day plans)\n");
        }
        match formatting::describe_repeat(&repeat) {
            Some(desc) => result.push_str(&format!("  Repeats: {}\n", desc)),
            None => result.push_str("  Repeats: no\n"),
        }
        match next_occurrence(anchor, &repeat, window.end()) {
            Some(next) => result.push_str(&format!(
                "  Next after this day: {}\n",
                formatting::format_date_time(next)
            )),
            None => result.push_str("  Next after this day: none\n"),
        }

        Ok(result)
    }
}
