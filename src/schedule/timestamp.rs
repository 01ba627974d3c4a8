//! Instant parsing into the reference calendar
//!
//! Storage hands timestamps over as strings. Values carrying an offset are converted
//! into the caller's reference time zone; naive values are taken as already local.

use crate::error::RecordError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Last representable instant of a day at millisecond precision (23:59:59.999)
pub fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Parse a timestamp field into the reference calendar
///
/// A bare date (`2026-01-05`) resolves to midnight of that date.
///
/// # Arguments
/// * `raw` - The stored value
/// * `tz` - Reference calendar for offset-carrying values
/// * `field` - Field name reported on failure
pub fn parse_timestamp<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
    field: &'static str,
) -> Result<NaiveDateTime, RecordError> {
    parse_with_date_time(raw, tz, field, NaiveTime::MIN)
}

/// Parse an inclusive end bound
///
/// Same as [`parse_timestamp`], except that a bare date resolves to the end of that
/// day, so "until Jan 10" still covers an occurrence at 09:00 on Jan 10.
pub fn parse_end_bound<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
    field: &'static str,
) -> Result<NaiveDateTime, RecordError> {
    parse_with_date_time(raw, tz, field, end_of_day_time())
}

fn parse_with_date_time<Tz: TimeZone>(
    raw: &str,
    tz: &Tz,
    field: &'static str,
    date_only_time: NaiveTime,
) -> Result<NaiveDateTime, RecordError> {
    let value = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(tz).naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|date| date.and_time(date_only_time))
        .map_err(|_| RecordError::malformed(field, raw))
}
