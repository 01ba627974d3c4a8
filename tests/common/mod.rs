//! Common test utilities for integration tests
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use daybook_mcp::{DayOptions, DaybookServerHandler, Records, ReferenceZone};
use std::io::Write;
use tempfile::NamedTempFile;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

/// Data file with one of everything, including a broken reminder
pub const SAMPLE_TOML: &str = r#"
[[reminders]]
id = "pills"
title = "Take pills"
remind_at = "2026-01-01T08:00:00"
repeat_type = "daily"

[[reminders]]
id = "plants"
title = "Water plants"
anchor_time = "2026-01-01T18:00:00"
repeat_type = "weekly"
repeat_interval = 2

[[reminders]]
id = "rent"
title = "Pay rent"
anchor_time = "2026-01-31T09:00:00"
repeat_type = "monthly"
repeat_end_date = "2026-06-30"

[[reminders]]
id = "broken"
title = "Broken reminder"
anchor_time = "2026-01-01T07:00:00"
repeat_type = "daily"
repeat_interval = 0

[[reminders]]
id = "done"
title = "Already done"
anchor_time = "2026-01-15T12:00:00"
is_completed = true

[[events]]
id = "standup"
title = "Standup"
start_at = "2026-01-15T09:30:00"
end_at = "2026-01-15T09:45:00"
location = "Room 4"

[[events]]
id = "dinner"
title = "Dinner"
start_at = "2026-01-15T18:00:00"

[[todos]]
id = "taxes"
title = "File taxes"
due_at = "2026-04-15"

[[todos]]
id = "milk"
title = "Buy milk"

[[todos]]
id = "old"
title = "Old todo"
status = "completed"
"#;

/// Write `content` into a temporary data file
pub fn write_data_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn sample_records() -> Records {
    toml::from_str(SAMPLE_TOML).unwrap()
}

/// Create a test handler over the sample records, in UTC
pub fn get_test_handler() -> DaybookServerHandler {
    DaybookServerHandler::from_records(
        sample_records(),
        ReferenceZone::Fixed(chrono::FixedOffset::east_opt(0).unwrap()),
        DayOptions::default(),
    )
}
