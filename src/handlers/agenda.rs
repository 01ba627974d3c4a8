//! Agenda handler for the daybook MCP server

use crate::DaybookServerHandler;
use crate::formatting;
use crate::schedule::TaskScope;
use crate::validation;
use chrono::{Days, NaiveDate, NaiveTime};
use mcp_attr::Result as McpResult;

/// Events listed after the agenda's last day
const UPCOMING_LIMIT: usize = 10;

impl DaybookServerHandler {
    /// Builds consecutive day plans and lists the next upcoming events.
    pub async fn handle_agenda(&self, start: Option<String>, days: Option<u32>) -> McpResult<String> {
        let start = validation::parse_optional_date(start.as_deref(), self.zone.today())?;
        let days = validation::parse_days_param(days)?;

        let plans = self
            .zone
            .build_agenda(start, days, &self.records, &self.options);

        // Every day lists the same tasks when all pending ones are shown, so list them once
        let tasks_per_day = self.options.task_scope != TaskScope::AllPending;

        let mut result = String::new();
        for plan in &plans {
            result.push_str(&formatting::format_day_plan(plan, tasks_per_day));
            result.push('\n');
        }

        if !tasks_per_day && let Some(first) = plans.first() {
            result.push_str(&formatting::format_tasks("Pending tasks", &first.tasks));
            result.push('\n');
        }

        // Unreadable events were already reported in the day plans
        let after_agenda = start
            .checked_add_days(Days::new(days as u64))
            .unwrap_or(NaiveDate::MAX)
            .and_time(NaiveTime::MIN);
        let (upcoming, _) =
            self.zone
                .upcoming_events(&self.records.events, after_agenda, UPCOMING_LIMIT);
        result.push_str(&formatting::format_upcoming(&upcoming));

        Ok(result)
    }
}
