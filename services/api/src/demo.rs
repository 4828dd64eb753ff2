use std::process::ExitCode;
use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Timelike};
use clap::Args;
use clinic_booking::accounts::{
    AuthService, FileSessionStore, InMemorySessionStore, Role, SessionManager, SessionStore,
    SignUpForm,
};
use clinic_booking::appointments::format::format_date_time;
use clinic_booking::appointments::{AppointmentFeed, Owner, RosterSource};
use clinic_booking::config::AppConfig;
use clinic_booking::error::AppError;
use clinic_booking::locale::Locale;
use clinic_booking::scheduling::{EligibilityValidator, ReasonCode};
use clinic_booking::wire;

use crate::infra::BookingStack;

const SEARCH_WINDOW_HOURS: i64 = 14 * 24;

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    /// Candidate slot (YYYY-MM-DDTHH:MM[:SS])
    #[arg(long, value_parser = wire::parse_timestamp)]
    pub(crate) at: NaiveDateTime,
    /// Evaluate as of this instant instead of the local clock
    #[arg(long, value_parser = wire::parse_timestamp)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Message language (en or es). Defaults to BOOKING_LOCALE.
    #[arg(long, value_parser = crate::infra::parse_locale)]
    pub(crate) locale: Option<Locale>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Pin the demo clock (YYYY-MM-DDTHH:MM[:SS]). Defaults to the local clock.
    #[arg(long, value_parser = wire::parse_timestamp)]
    pub(crate) now: Option<NaiveDateTime>,
    /// Output language (en or es). Defaults to BOOKING_LOCALE.
    #[arg(long, value_parser = crate::infra::parse_locale)]
    pub(crate) locale: Option<Locale>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<ExitCode, AppError> {
    let CheckArgs { at, now, locale } = args;
    let config = AppConfig::load()?;
    let locale = locale.unwrap_or(config.booking.locale);

    let validator = EligibilityValidator::new(config.booking.rules);
    let now = now.unwrap_or_else(|| validator.now());
    let verdict = validator.check_at(at, now);

    println!(
        "Candidate {} ({})",
        wire::format_timestamp(&at),
        format_date_time(&at, locale)
    );
    println!("Evaluated at {}", wire::format_timestamp(&now));
    match serde_json::to_string_pretty(&verdict) {
        Ok(json) => println!("{}", json),
        Err(err) => println!("Verdict unavailable: {}", err),
    }
    if let Some(message) = verdict.message(locale, validator.rules()) {
        println!("{}", message);
    }

    Ok(if verdict.is_valid() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<ExitCode, AppError> {
    let DemoArgs { now, locale } = args;
    let config = AppConfig::load()?;
    let locale = locale.unwrap_or(config.booking.locale);
    let stack = BookingStack::with_rules(config.booking.rules, now);

    match config.booking.session_file {
        Some(path) => walkthrough(&stack, FileSessionStore::new(path), locale),
        None => walkthrough(&stack, InMemorySessionStore::default(), locale),
    }
}

fn walkthrough<S>(stack: &BookingStack, store: S, locale: Locale) -> Result<ExitCode, AppError>
where
    S: SessionStore + 'static,
{
    let now = stack.validator.now();
    let rules = *stack.validator.rules();
    println!("Clinic booking demo ({})", format_date_time(&now, locale));

    let session = Arc::new(SessionManager::new(Arc::new(store)));
    if let Some(previous) = session.load() {
        println!("- Restored session for {} <{}>", previous.name, previous.email);
    }

    let auth = AuthService::new(stack.backend.clone(), session.clone());
    let patient = auth.sign_up(&SignUpForm {
        name: "Ana Torres".to_string(),
        email: "ana.torres@example.com".to_string(),
        password: "paciente1".to_string(),
        confirm_password: "paciente1".to_string(),
        role: Role::Patient,
    })?;
    println!(
        "- Signed up {} <{}> as {} (id {})",
        patient.name,
        patient.email,
        patient.role.code(),
        patient.id
    );

    let roster = stack.directory.load();
    let source = match roster.source {
        RosterSource::Remote => "remote",
        RosterSource::Fallback => "fallback",
    };
    println!("- Doctors ({} roster):", source);
    for doctor in &roster.doctors {
        println!("    - {} <{}>", doctor.name, doctor.email);
    }
    let doctor_id = roster.default_selection();

    if let Some(slot) = first_slot_where(now, |slot| {
        stack.validator.check_at(slot, now).reason() == Some(ReasonCode::WeekendNotAllowed)
    }) {
        match stack.booking.book(Some(&patient), doctor_id, slot) {
            Err(err) => println!(
                "- Rejected {}: {}",
                format_date_time(&slot, locale),
                err.user_message(locale, &rules)
            ),
            Ok(appointment) => println!("- Weekend slot accepted as #{}", appointment.id),
        }
    }

    let Some(slot) = first_slot_where(now, |slot| stack.validator.check_at(slot, now).is_valid())
    else {
        println!("- No bookable slot in the next two weeks");
        return Ok(ExitCode::SUCCESS);
    };
    let booked = match stack.booking.book(Some(&patient), doctor_id, slot) {
        Ok(appointment) => appointment,
        Err(err) => {
            println!("- Booking failed: {}", err.user_message(locale, &rules));
            return Ok(ExitCode::FAILURE);
        }
    };
    println!(
        "- Booked #{} with {} for {}",
        booked.id,
        booked.doctor_display_name().unwrap_or("-"),
        format_date_time(&booked.date_time, locale)
    );

    let feed = AppointmentFeed::new(stack.backend.clone(), Owner::for_user(&patient));
    if let Err(err) = feed.refresh() {
        println!("- Appointment list unavailable: {}", err);
    }
    println!("- Appointments for {}:", patient.name);
    for appointment in feed.appointments() {
        println!(
            "    - #{} {} [{}]",
            appointment.id,
            format_date_time(&appointment.date_time, locale),
            appointment.status.label(locale)
        );
    }

    let outcome = feed.cancel(booked.id);
    match outcome.failure_message(locale) {
        Some(message) => println!("- Cancellation failed: {}", message),
        None => println!("- Cancelled #{}", booked.id),
    }
    let tally = feed.tally();
    println!("- Tally: {} active / {} canceled", tally.active, tally.canceled);

    auth.sign_out()?;
    println!("- Signed out");
    Ok(ExitCode::SUCCESS)
}

/// First whole-hour slot after `now`, within the search window, accepted by `keep`.
fn first_slot_where(
    now: NaiveDateTime,
    keep: impl Fn(NaiveDateTime) -> bool,
) -> Option<NaiveDateTime> {
    let start = now
        .with_nanosecond(0)
        .and_then(|slot| slot.with_second(0))
        .and_then(|slot| slot.with_minute(0))?;

    (1..=SEARCH_WINDOW_HOURS)
        .filter_map(|offset| start.checked_add_signed(Duration::hours(offset)))
        .find(|slot| keep(*slot))
}
