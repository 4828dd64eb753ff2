use super::policy::{EligibilityVerdict, ReasonCode};
use super::rules::SchedulingRules;
use crate::locale::Locale;

impl ReasonCode {
    /// User-facing explanation rendered from the active rules.
    pub fn message(self, locale: Locale, rules: &SchedulingRules) -> String {
        match (self, locale) {
            (Self::TooSoon, Locale::English) => format!(
                "The appointment must be at least {} in the future",
                plural(rules.min_advance_hours, "hour", "hours")
            ),
            (Self::TooSoon, Locale::Spanish) => format!(
                "La cita debe ser al menos {} en el futuro",
                plural(rules.min_advance_hours, "hora", "horas")
            ),
            (Self::OutsideWorkHours, Locale::English) => format!(
                "Office hours: {:02}:00 - {:02}:00",
                rules.work_hour_start, rules.work_hour_end
            ),
            (Self::OutsideWorkHours, Locale::Spanish) => format!(
                "Horario de atención: {:02}:00 - {:02}:00",
                rules.work_hour_start, rules.work_hour_end
            ),
            (Self::WeekendNotAllowed, Locale::English) => {
                if rules.work_day_min == rules.work_day_max {
                    format!(
                        "Appointments can only be booked on {}",
                        locale.weekday_name(rules.work_day_min)
                    )
                } else {
                    format!(
                        "Appointments can only be booked {} through {}",
                        locale.weekday_name(rules.work_day_min),
                        locale.weekday_name(rules.work_day_max)
                    )
                }
            }
            (Self::WeekendNotAllowed, Locale::Spanish) => {
                if rules.work_day_min == rules.work_day_max {
                    format!(
                        "Solo se pueden agendar citas los {}",
                        locale.weekday_name(rules.work_day_min)
                    )
                } else {
                    format!(
                        "Solo se pueden agendar citas de {} a {}",
                        locale.weekday_name(rules.work_day_min),
                        locale.weekday_name(rules.work_day_max)
                    )
                }
            }
            (Self::TooFarInAdvance, Locale::English) => format!(
                "Appointments cannot be booked more than {} in advance",
                plural(rules.max_advance_months, "month", "months")
            ),
            (Self::TooFarInAdvance, Locale::Spanish) => format!(
                "No se pueden agendar citas con más de {} de anticipación",
                plural(rules.max_advance_months, "mes", "meses")
            ),
        }
    }
}

impl EligibilityVerdict {
    pub fn message(&self, locale: Locale, rules: &SchedulingRules) -> Option<String> {
        self.reason().map(|reason| reason.message(locale, rules))
    }
}

fn plural(count: u32, one: &str, many: &str) -> String {
    if count == 1 {
        format!("{count} {one}")
    } else {
        format!("{count} {many}")
    }
}
