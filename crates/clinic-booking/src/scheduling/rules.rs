use serde::{Deserialize, Serialize};

pub const DEFAULT_MIN_ADVANCE_HOURS: u32 = 1;
pub const DEFAULT_MAX_ADVANCE_MONTHS: u32 = 3;
pub const DEFAULT_WORK_HOUR_START: u32 = 8;
pub const DEFAULT_WORK_HOUR_END: u32 = 18;
pub const DEFAULT_WORK_DAY_MIN: u32 = 1;
pub const DEFAULT_WORK_DAY_MAX: u32 = 5;

/// Booking window configuration shared by every call site that admits a new appointment.
///
/// Hours are hour-of-day values in `0..=23`, with `work_hour_start` bookable and
/// `work_hour_end` not. Days count from Sunday (`0`) to Saturday (`6`) and both ends of the
/// range are bookable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulingRules {
    pub min_advance_hours: u32,
    pub max_advance_months: u32,
    pub work_hour_start: u32,
    pub work_hour_end: u32,
    pub work_day_min: u32,
    pub work_day_max: u32,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            min_advance_hours: DEFAULT_MIN_ADVANCE_HOURS,
            max_advance_months: DEFAULT_MAX_ADVANCE_MONTHS,
            work_hour_start: DEFAULT_WORK_HOUR_START,
            work_hour_end: DEFAULT_WORK_HOUR_END,
            work_day_min: DEFAULT_WORK_DAY_MIN,
            work_day_max: DEFAULT_WORK_DAY_MAX,
        }
    }
}

impl SchedulingRules {
    /// Reject configurations whose windows are out of range or empty.
    pub fn check(&self) -> Result<(), RulesError> {
        for (field, value) in [
            ("work_hour_start", self.work_hour_start),
            ("work_hour_end", self.work_hour_end),
        ] {
            if value > 23 {
                return Err(RulesError::HourOutOfRange { field, value });
            }
        }

        for (field, value) in [
            ("work_day_min", self.work_day_min),
            ("work_day_max", self.work_day_max),
        ] {
            if value > 6 {
                return Err(RulesError::DayOutOfRange { field, value });
            }
        }

        if self.work_hour_start >= self.work_hour_end {
            return Err(RulesError::EmptyHourWindow {
                start: self.work_hour_start,
                end: self.work_hour_end,
            });
        }

        if self.work_day_min > self.work_day_max {
            return Err(RulesError::EmptyDayRange {
                min: self.work_day_min,
                max: self.work_day_max,
            });
        }

        Ok(())
    }
}

/// Inconsistent scheduling configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("{field} must be an hour between 0 and 23 (found {value})")]
    HourOutOfRange { field: &'static str, value: u32 },
    #[error("{field} must be a day of week between 0 (Sunday) and 6 (Saturday) (found {value})")]
    DayOutOfRange { field: &'static str, value: u32 },
    #[error("work hours {start}:00-{end}:00 leave no bookable hour")]
    EmptyHourWindow { start: u32, end: u32 },
    #[error("work days {min}..={max} leave no bookable day")]
    EmptyDayRange { min: u32, max: u32 },
}
