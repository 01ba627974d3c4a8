//! Today handler for the daybook MCP server

use crate::DaybookServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;
use tracing::info;

impl DaybookServerHandler {
    /// Builds one day's plan (schedule, pending tasks, skipped records) and formats it.
    pub async fn handle_today(&self, date: Option<String>) -> McpResult<String> {
        let date = validation::parse_optional_date(date.as_deref(), self.zone.today())?;

        let plan = self.zone.build_day(date, &self.records, &self.options);
        info!(
            %date,
            scheduled = plan.schedule.len(),
            tasks = plan.tasks.len(),
            "today"
        );

        Ok(formatting::format_day_plan(&plan, true))
    }
}
