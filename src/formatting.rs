//! Formatting helper functions for the daybook MCP server
//!
//! This module renders day plans and repeat rules as plain text for tool responses.

use crate::schedule::{DayPlan, ItemKind, Repeat, RepeatKind, ScheduleItem, Todo};
use chrono::NaiveDateTime;

/// Format a time of day, e.g. "9:05 AM"
pub fn format_time(time: NaiveDateTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Format a date and time, e.g. "Jan 5, 2026 9:05 AM"
pub fn format_date_time(time: NaiveDateTime) -> String {
    time.format("%b %-d, %Y %-I:%M %p").to_string()
}

/// Describe a repeat rule for display
///
/// # Returns
/// `None` for a one-off reminder, otherwise e.g. "Weekly" or
/// "Every 2 months until Mar 1, 2026 11:59 PM"
pub fn describe_repeat(repeat: &Repeat) -> Option<String> {
    let Repeat::Every(rule) = repeat else {
        return None;
    };

    let mut desc = if rule.interval() == 1 {
        match rule.kind() {
            RepeatKind::daily => "Daily",
            RepeatKind::weekly => "Weekly",
            RepeatKind::monthly => "Monthly",
            RepeatKind::yearly => "Yearly",
        }
        .to_string()
    } else {
        format!("Every {} {}s", rule.interval(), rule.kind().unit())
    };

    if let Some(end) = rule.end_date() {
        desc.push_str(&format!(" until {}", format_date_time(end)));
    }
    if let Some(count) = rule.count() {
        desc.push_str(&format!(" ({} times)", count));
    }

    Some(desc)
}

fn format_item(item: &ScheduleItem) -> String {
    let kind = match item.kind {
        ItemKind::event => "event",
        ItemKind::reminder => "reminder",
    };

    let when = match item.end_time {
        Some(end) => format!("{} - {}", format_time(item.time), format_time(end)),
        None => format_time(item.time),
    };

    let mut result = format!("- {} [{}] {} ({})\n", when, kind, item.title, item.id);
    if let Some(ref location) = item.location {
        result.push_str(&format!("  Location: {}\n", location));
    }
    if let Some(ref notes) = item.notes {
        result.push_str(&format!("  Notes: {}\n", notes));
    }
    result
}

/// Format a day plan into a display string
///
/// # Arguments
/// * `plan` - The plan to render
/// * `include_tasks` - Whether to list pending tasks after the schedule
pub fn format_day_plan(plan: &DayPlan, include_tasks: bool) -> String {
    let mut result = format!("Schedule for {}:\n", plan.date.format("%a, %b %-d, %Y"));

    if plan.schedule.is_empty() {
        result.push_str("No scheduled items\n");
    }
    for item in &plan.schedule {
        result.push_str(&format_item(item));
    }

    if include_tasks {
        result.push('\n');
        result.push_str(&format_tasks("Tasks", &plan.tasks));
    }

    if !plan.diagnostics.is_empty() {
        result.push_str(&format!(
            "\nSkipped {} record(s):\n",
            plan.diagnostics.len()
        ));
        for diagnostic in &plan.diagnostics {
            result.push_str(&format!("- {}\n", diagnostic));
        }
    }

    result
}

/// Format a list of pending tasks under a heading, e.g. "Tasks (2):"
pub fn format_tasks(heading: &str, tasks: &[Todo]) -> String {
    let mut result = format!("{} ({}):\n", heading, tasks.len());
    if tasks.is_empty() {
        result.push_str("No pending tasks\n");
    }
    for task in tasks {
        result.push_str(&format!("- [{}] {}", task.id, task.title));
        if let Some(ref due) = task.due_at {
            result.push_str(&format!(" (due: {})", due));
        }
        if let Some(priority) = task.priority {
            result.push_str(&format!(" (priority: {})", priority));
        }
        result.push('\n');
    }
    result
}

/// Format a list of upcoming events
pub fn format_upcoming(items: &[ScheduleItem]) -> String {
    if items.is_empty() {
        return "No upcoming events\n".to_string();
    }

    let mut result = format!("Upcoming events ({}):\n", items.len());
    for item in items {
        result.push_str(&format!(
            "- {} {} ({})\n",
            format_date_time(item.time),
            item.title,
            item.id
        ));
    }
    result
}
