//! Validation helper functions for the daybook MCP server
//!
//! This module parses and validates tool parameters (dates, day counts, record IDs)
//! and the reference calendar offset given on the command line.

use chrono::{FixedOffset, NaiveDate};
use mcp_attr::Result as McpResult;

/// Longest agenda the `agenda` tool builds
pub const MAX_AGENDA_DAYS: u32 = 31;

/// Default agenda length
pub const DEFAULT_AGENDA_DAYS: u32 = 7;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse and validate a date parameter
///
/// # Arguments
/// * `date_str` - Date string in YYYY-MM-DD format
///
/// # Returns
/// Result containing parsed NaiveDate or error
pub fn parse_date_param(date_str: &str) -> McpResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
        invalid_params(format!(
            "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2026-01-05')",
            date_str
        ))
    })
}

/// Parse an optional date parameter, falling back to `today`
pub fn parse_optional_date(date_str: Option<&str>, today: NaiveDate) -> McpResult<NaiveDate> {
    match date_str.map(str::trim) {
        None | Some("") => Ok(today),
        Some(s) => parse_date_param(s),
    }
}

/// Validate the number of agenda days
pub fn parse_days_param(days: Option<u32>) -> McpResult<usize> {
    let days = days.unwrap_or(DEFAULT_AGENDA_DAYS);
    if days == 0 || days > MAX_AGENDA_DAYS {
        return Err(invalid_params(format!(
            "Invalid days '{}'. Use a value between 1 and {}",
            days, MAX_AGENDA_DAYS
        )));
    }
    Ok(days as usize)
}

/// Normalize a record ID by trimming surrounding whitespace
pub fn normalize_record_id(id: &str) -> String {
    id.trim().to_string()
}

/// Parse a UTC offset such as "+09:00", "-05:30" or "Z"
pub fn parse_utc_offset(s: &str) -> Result<FixedOffset, String> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| "invalid offset".to_string());
    }

    let invalid = || format!("Invalid UTC offset '{}'. Use ±HH:MM (e.g., '+09:00')", s);

    let (sign, rest) = match s.split_at_checked(1) {
        Some(("+", rest)) => (1, rest),
        Some(("-", rest)) => (-1, rest),
        _ => return Err(invalid()),
    };
    let (hours, minutes) = rest.split_once(':').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(hours) || !two_digits(minutes) {
        return Err(invalid());
    }
    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
