use std::sync::Arc;

use chrono::Duration;

use super::common::*;
use crate::scheduling::{
    validate, EligibilityValidator, EligibilityVerdict, FixedClock, ReasonCode, SchedulingRules,
};

#[test]
fn rejects_slots_with_less_than_an_hour_of_notice() {
    let verdict = validate(at(2024, 6, 10, 10, 30), monday_morning(), &rules());
    assert_eq!(verdict, EligibilityVerdict::rejected(ReasonCode::TooSoon));
}

#[test]
fn rejects_slots_before_opening() {
    let verdict = validate(at(2024, 6, 11, 7, 0), monday_morning(), &rules());
    assert_eq!(verdict.reason(), Some(ReasonCode::OutsideWorkHours));
}

#[test]
fn rejects_saturday_slots() {
    let verdict = validate(at(2024, 6, 15, 10, 0), monday_morning(), &rules());
    assert_eq!(verdict.reason(), Some(ReasonCode::WeekendNotAllowed));
}

#[test]
fn rejects_slots_beyond_the_horizon() {
    let verdict = validate(at(2024, 10, 15, 10, 0), monday_morning(), &rules());
    assert_eq!(verdict.reason(), Some(ReasonCode::TooFarInAdvance));
}

#[test]
fn accepts_weekday_slot_in_hours() {
    let verdict = validate(at(2024, 6, 11, 9, 0), monday_morning(), &rules());
    assert!(verdict.is_valid());
    assert_eq!(verdict.reason(), None);
    assert_eq!(verdict.into_result(), Ok(()));
}

#[test]
fn past_slots_are_reported_as_too_soon() {
    let verdict = validate(at(2024, 6, 3, 9, 0), monday_morning(), &rules());
    assert_eq!(verdict.reason(), Some(ReasonCode::TooSoon));
}

#[test]
fn exactly_the_minimum_notice_is_enough() {
    let now = at(2024, 6, 11, 9, 0);
    let candidate = now + Duration::hours(1);
    assert!(validate(candidate, now, &rules()).is_valid());

    let just_short = candidate - Duration::seconds(1);
    assert_eq!(
        validate(just_short, now, &rules()).reason(),
        Some(ReasonCode::TooSoon)
    );
}

#[test]
fn hour_window_is_half_open() {
    let now = monday_morning();
    assert!(validate(at(2024, 6, 11, 8, 0), now, &rules()).is_valid());
    assert!(validate(at(2024, 6, 11, 17, 59), now, &rules()).is_valid());
    assert_eq!(
        validate(at(2024, 6, 11, 18, 0), now, &rules()).reason(),
        Some(ReasonCode::OutsideWorkHours)
    );
}

#[test]
fn weekday_range_is_closed_on_both_ends() {
    let now = monday_morning();
    // 2024-06-17 is a Monday, 2024-06-14 a Friday, 2024-06-16 a Sunday.
    assert!(validate(at(2024, 6, 17, 9, 0), now, &rules()).is_valid());
    assert!(validate(at(2024, 6, 14, 9, 0), now, &rules()).is_valid());
    assert_eq!(
        validate(at(2024, 6, 16, 9, 0), now, &rules()).reason(),
        Some(ReasonCode::WeekendNotAllowed)
    );
}

#[test]
fn horizon_is_inclusive_of_the_cutoff_instant() {
    // 2024-06-10 10:00 + 3 months = 2024-09-10 10:00 (a Tuesday).
    let now = monday_morning();
    assert!(validate(at(2024, 9, 10, 10, 0), now, &rules()).is_valid());
    assert_eq!(
        validate(at(2024, 9, 10, 10, 1), now, &rules()).reason(),
        Some(ReasonCode::TooFarInAdvance)
    );
}

#[test]
fn horizon_uses_calendar_months_not_ninety_days() {
    // Ninety days after 2024-06-10 is 2024-09-08; calendar months reach 2024-09-10.
    let now = monday_morning();
    let past_ninety_days = at(2024, 9, 9, 9, 0);
    assert!(past_ninety_days > now + Duration::days(90));
    assert!(validate(past_ninety_days, now, &rules()).is_valid());
}

#[test]
fn horizon_clamps_to_the_end_of_short_months() {
    // Wednesday 2025-01-29 + 1 month clamps to Friday 2025-02-28.
    let now = at(2025, 1, 29, 9, 0);
    let rules = SchedulingRules {
        max_advance_months: 1,
        ..SchedulingRules::default()
    };
    assert!(validate(at(2025, 2, 28, 9, 0), now, &rules).is_valid());
    assert_eq!(
        validate(at(2025, 2, 28, 9, 30), now, &rules).reason(),
        Some(ReasonCode::TooFarInAdvance)
    );
}

#[test]
fn first_failing_rule_wins() {
    // Saturday night, too soon: advance notice is reported first.
    let now = at(2024, 6, 15, 19, 0);
    assert_eq!(
        validate(at(2024, 6, 15, 19, 30), now, &rules()).reason(),
        Some(ReasonCode::TooSoon)
    );
    // Far-future Sunday at 07:00: work hours beat weekday and horizon.
    assert_eq!(
        validate(at(2025, 6, 15, 7, 0), monday_morning(), &rules()).reason(),
        Some(ReasonCode::OutsideWorkHours)
    );
    // Far-future Saturday in hours: weekday beats horizon.
    assert_eq!(
        validate(at(2025, 6, 14, 10, 0), monday_morning(), &rules()).reason(),
        Some(ReasonCode::WeekendNotAllowed)
    );
}

#[test]
fn custom_rules_shift_every_boundary() {
    let rules = SchedulingRules {
        min_advance_hours: 24,
        max_advance_months: 1,
        work_hour_start: 10,
        work_hour_end: 14,
        work_day_min: 0,
        work_day_max: 6,
    };
    let now = monday_morning();
    assert_eq!(
        validate(at(2024, 6, 11, 9, 59), now, &rules).reason(),
        Some(ReasonCode::TooSoon)
    );
    assert!(validate(at(2024, 6, 16, 10, 0), now, &rules).is_valid());
    assert_eq!(
        validate(at(2024, 6, 16, 14, 0), now, &rules).reason(),
        Some(ReasonCode::OutsideWorkHours)
    );
    assert_eq!(
        validate(at(2024, 7, 11, 10, 0), now, &rules).reason(),
        Some(ReasonCode::TooFarInAdvance)
    );
}

#[test]
fn unrepresentable_horizon_never_rejects() {
    let rules = SchedulingRules {
        max_advance_months: u32::MAX,
        ..SchedulingRules::default()
    };
    assert!(validate(at(2030, 6, 11, 9, 0), monday_morning(), &rules).is_valid());
}

#[test]
fn validator_uses_its_clock_for_now() {
    let validator =
        EligibilityValidator::with_clock(rules(), Arc::new(FixedClock(monday_morning())));

    assert_eq!(validator.now(), monday_morning());
    assert_eq!(
        validator.check(at(2024, 6, 10, 10, 30)).reason(),
        Some(ReasonCode::TooSoon)
    );
    assert!(validator.check(at(2024, 6, 11, 9, 0)).is_valid());
    assert_eq!(
        validator
            .check_at(at(2024, 6, 11, 9, 0), at(2024, 6, 11, 8, 30))
            .reason(),
        Some(ReasonCode::TooSoon)
    );
}

#[test]
fn default_validator_rejects_the_distant_past() {
    let validator = EligibilityValidator::default();
    assert_eq!(validator.rules(), &SchedulingRules::default());
    assert_eq!(
        validator.check(at(2000, 1, 3, 9, 0)).reason(),
        Some(ReasonCode::TooSoon)
    );
}

#[test]
fn verdict_serializes_without_reason_when_valid() {
    let valid = serde_json::to_value(EligibilityVerdict::valid()).expect("serializes");
    assert_eq!(valid, serde_json::json!({ "isValid": true }));

    let rejected = serde_json::to_value(EligibilityVerdict::rejected(
        ReasonCode::WeekendNotAllowed,
    ))
    .expect("serializes");
    assert_eq!(
        rejected,
        serde_json::json!({ "isValid": false, "reason": "WEEKEND_NOT_ALLOWED" })
    );
}
