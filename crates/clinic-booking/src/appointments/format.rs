//! Display formatting for appointment dates.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::locale::Locale;

/// Long date, e.g. `martes, 11 de junio de 2024` or `Tuesday, June 11, 2024`.
pub fn format_date(value: &NaiveDateTime, locale: Locale) -> String {
    let weekday = locale.weekday_name(value.weekday().num_days_from_sunday());
    let month = locale.month_name(value.month());
    match locale {
        Locale::English => format!("{weekday}, {month} {}, {}", value.day(), value.year()),
        Locale::Spanish => format!("{weekday}, {} de {month} de {}", value.day(), value.year()),
    }
}

/// 24-hour clock time, e.g. `09:05`.
pub fn format_time(value: &NaiveDateTime) -> String {
    format!("{:02}:{:02}", value.hour(), value.minute())
}

pub fn format_date_time(value: &NaiveDateTime, locale: Locale) -> String {
    format!("{} - {}", format_date(value, locale), format_time(value))
}
