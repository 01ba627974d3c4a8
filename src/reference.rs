//! Reference calendar for the server
//!
//! The schedule core takes its time zone as a type parameter and never reads the clock.
//! This is where the server resolves "now" and picks the zone it hands to the core.

use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};

use crate::error::{Diagnostic, RecordError};
use crate::schedule::{self, DayOptions, DayPlan, Event, Records, Reminder, Repeat, ScheduleItem};

/// Time zone the server builds days in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceZone {
    /// The host's local time zone, DST included
    #[default]
    Local,
    /// A fixed UTC offset
    Fixed(FixedOffset),
}

impl ReferenceZone {
    pub fn now(&self) -> NaiveDateTime {
        match self {
            ReferenceZone::Local => Local::now().naive_local(),
            ReferenceZone::Fixed(offset) => Utc::now().with_timezone(offset).naive_local(),
        }
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn build_day(&self, date: NaiveDate, records: &Records, options: &DayOptions) -> DayPlan {
        match self {
            ReferenceZone::Local => schedule::build_day(
                date,
                &Local,
                &records.events,
                &records.reminders,
                &records.todos,
                options,
            ),
            ReferenceZone::Fixed(offset) => schedule::build_day(
                date,
                offset,
                &records.events,
                &records.reminders,
                &records.todos,
                options,
            ),
        }
    }

    pub fn build_agenda(
        &self,
        start: NaiveDate,
        days: usize,
        records: &Records,
        options: &DayOptions,
    ) -> Vec<DayPlan> {
        match self {
            ReferenceZone::Local => schedule::build_agenda(start, days, &Local, records, options),
            ReferenceZone::Fixed(offset) => {
                schedule::build_agenda(start, days, offset, records, options)
            }
        }
    }

    pub fn upcoming_events(
        &self,
        events: &[Event],
        now: NaiveDateTime,
        limit: usize,
    ) -> (Vec<ScheduleItem>, Vec<Diagnostic>) {
        match self {
            ReferenceZone::Local => schedule::upcoming_events(events, now, limit, &Local),
            ReferenceZone::Fixed(offset) => schedule::upcoming_events(events, now, limit, offset),
        }
    }

    /// Anchor and validated repeat rule of a reminder, read in this zone
    pub fn read_reminder(&self, reminder: &Reminder) -> Result<(NaiveDateTime, Repeat), RecordError> {
        match self {
            ReferenceZone::Local => Ok((reminder.anchor(&Local)?, reminder.repeat(&Local)?)),
            ReferenceZone::Fixed(offset) => {
                Ok((reminder.anchor(offset)?, reminder.repeat(offset)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_zone_reads_offsets() {
        let zone = ReferenceZone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap());
        let reminder = Reminder::new("r1", "Check in", "2026-01-05T22:30:00Z");
        let (anchor, repeat) = zone.read_reminder(&reminder).unwrap();
        assert_eq!(
            anchor,
            NaiveDate::from_ymd_opt(2026, 1, 6)
                .unwrap()
                .and_hms_opt(0, 30, 0)
                .unwrap()
        );
        assert_eq!(repeat, Repeat::NoRepeat);
    }
}
