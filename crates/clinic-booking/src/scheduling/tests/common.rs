use chrono::{NaiveDate, NaiveDateTime};

use crate::scheduling::SchedulingRules;

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

/// Monday 2024-06-10 10:00, the reference "now" for the booking scenarios.
pub(super) fn monday_morning() -> NaiveDateTime {
    at(2024, 6, 10, 10, 0)
}

pub(super) fn rules() -> SchedulingRules {
    SchedulingRules::default()
}
