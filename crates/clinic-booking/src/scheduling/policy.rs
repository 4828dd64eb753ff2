use chrono::{Datelike, Duration, Months, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use super::rules::SchedulingRules;

/// Rule a rejected slot violated. Each code maps to exactly one check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReasonCode {
    TooSoon,
    OutsideWorkHours,
    WeekendNotAllowed,
    TooFarInAdvance,
}

impl ReasonCode {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::TooSoon,
            Self::OutsideWorkHours,
            Self::WeekendNotAllowed,
            Self::TooFarInAdvance,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::TooSoon => "TOO_SOON",
            Self::OutsideWorkHours => "OUTSIDE_WORK_HOURS",
            Self::WeekendNotAllowed => "WEEKEND_NOT_ALLOWED",
            Self::TooFarInAdvance => "TOO_FAR_IN_ADVANCE",
        }
    }
}

/// Admissibility of a candidate slot. A rejected verdict always carries its reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityVerdict {
    is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<ReasonCode>,
}

impl EligibilityVerdict {
    pub const fn valid() -> Self {
        Self {
            is_valid: true,
            reason: None,
        }
    }

    pub const fn rejected(reason: ReasonCode) -> Self {
        Self {
            is_valid: false,
            reason: Some(reason),
        }
    }

    pub const fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub const fn reason(&self) -> Option<ReasonCode> {
        self.reason
    }

    pub fn into_result(self) -> Result<(), ReasonCode> {
        match self.reason {
            Some(reason) => Err(reason),
            None => Ok(()),
        }
    }
}

/// Decide whether `candidate` may be booked at `now`.
///
/// Checks run in a fixed order and the first failure wins: advance notice, work hours,
/// weekday, then horizon. Hour and weekday are read from the candidate's own wall-clock
/// fields. The horizon is `now` plus `max_advance_months` calendar months; when that date
/// cannot be represented the horizon check passes.
pub fn validate(
    candidate: NaiveDateTime,
    now: NaiveDateTime,
    rules: &SchedulingRules,
) -> EligibilityVerdict {
    let lead_time = candidate.signed_duration_since(now);
    if lead_time < Duration::hours(i64::from(rules.min_advance_hours)) {
        return EligibilityVerdict::rejected(ReasonCode::TooSoon);
    }

    let hour = candidate.hour();
    if hour < rules.work_hour_start || hour >= rules.work_hour_end {
        return EligibilityVerdict::rejected(ReasonCode::OutsideWorkHours);
    }

    let day = candidate.weekday().num_days_from_sunday();
    if day < rules.work_day_min || day > rules.work_day_max {
        return EligibilityVerdict::rejected(ReasonCode::WeekendNotAllowed);
    }

    if let Some(cutoff) = now.checked_add_months(Months::new(rules.max_advance_months)) {
        if candidate > cutoff {
            return EligibilityVerdict::rejected(ReasonCode::TooFarInAdvance);
        }
    }

    EligibilityVerdict::valid()
}
