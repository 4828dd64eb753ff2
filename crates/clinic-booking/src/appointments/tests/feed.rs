use std::sync::Arc;

use super::common::*;
use crate::appointments::domain::AppointmentStatus;
use crate::appointments::feed::{AppointmentFeed, AppointmentTally, CancelOutcome, Owner};
use crate::gateway::GatewayError;
use crate::locale::Locale;

#[test]
fn owner_follows_the_user_role() {
    let clinic = clinic();
    assert_eq!(
        Owner::for_user(&clinic.patient),
        Owner::Patient(clinic.patient.id)
    );
    assert_eq!(
        Owner::for_user(&clinic.doctor),
        Owner::Doctor(clinic.doctor.id)
    );
}

#[test]
fn refresh_loads_the_owner_appointments() {
    let clinic = clinic();
    clinic.book(at(2024, 6, 12, 9, 0));
    clinic.book(open_slot());

    let patient_feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    let doctor_feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Doctor(clinic.doctor.id),
    );

    assert!(patient_feed.appointments().is_empty());
    let listed = patient_feed.refresh().expect("refresh");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].date_time, open_slot());
    assert_eq!(patient_feed.appointments(), listed);
    assert_eq!(doctor_feed.refresh().expect("refresh").len(), 2);
}

#[test]
fn failed_refresh_keeps_the_previous_list() {
    let clinic = clinic();
    clinic.book(open_slot());
    let feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    feed.refresh().expect("refresh");

    clinic.backend.set_offline(true);
    assert!(matches!(feed.refresh(), Err(GatewayError::Network(_))));
    assert_eq!(feed.appointments().len(), 1);
}

#[test]
fn cancel_revalidates_with_the_server_state() {
    let clinic = clinic();
    let booked = clinic.book(open_slot());
    let feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    feed.refresh().expect("refresh");

    let outcome = feed.cancel(booked.id);

    assert!(outcome.is_cancelled());
    assert_eq!(outcome.failure_message(Locale::Spanish), None);
    let listed = feed.appointments();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, AppointmentStatus::Canceled);
    assert_eq!(
        feed.tally(),
        AppointmentTally {
            active: 0,
            canceled: 1
        }
    );
}

#[test]
fn failed_cancel_restores_the_list() {
    let clinic = clinic();
    let first = clinic.book(open_slot());
    clinic.book(at(2024, 6, 12, 9, 0));
    let feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    let before = feed.refresh().expect("refresh");

    clinic.backend.set_offline(true);
    let outcome = feed.cancel(first.id);

    assert!(!outcome.is_cancelled());
    assert!(matches!(outcome, CancelOutcome::Failed(GatewayError::Network(_))));
    assert_eq!(
        outcome.failure_message(Locale::Spanish).as_deref(),
        Some("Error al cancelar la cita")
    );
    assert_eq!(feed.appointments(), before);
}

#[test]
fn rejected_cancel_reports_the_server_message() {
    let clinic = clinic();
    let booked = clinic.book(open_slot());
    let feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    assert!(feed.cancel(booked.id).is_cancelled());

    let outcome = feed.cancel(booked.id);

    assert_eq!(
        outcome.failure_message(Locale::English).as_deref(),
        Some("appointment already canceled")
    );
    assert_eq!(feed.appointments().len(), 1);
}

#[test]
fn cancel_succeeds_even_when_the_follow_up_refresh_fails() {
    let clinic = clinic();
    let booked = clinic.book(open_slot());
    let gateway = ListingOutage::new(clinic.backend.clone());
    let feed = AppointmentFeed::new(
        Arc::new(gateway.clone()),
        Owner::Patient(clinic.patient.id),
    );
    feed.refresh().expect("refresh");

    gateway.take_listings_down();
    let outcome = feed.cancel(booked.id);

    assert!(outcome.is_cancelled());
    assert!(feed.appointments().is_empty());
    assert_eq!(
        clinic.backend.appointment(booked.id).map(|a| a.status),
        Some(AppointmentStatus::Canceled)
    );
}

#[test]
fn failed_cancel_keeps_a_refresh_that_landed_meanwhile() {
    let clinic = clinic();
    let first = clinic.book(at(2024, 6, 12, 9, 0));
    let gateway = Arc::new(StalledCancel::new(clinic.backend.clone()));
    let feed = AppointmentFeed::new(gateway.clone(), Owner::Patient(clinic.patient.id));
    feed.refresh().expect("refresh");

    let (outcome, later, hidden_while_pending, refreshed) = std::thread::scope(|scope| {
        let cancelling = scope.spawn(|| feed.cancel(first.id));

        gateway.entered.wait();
        let hidden_while_pending = feed.appointments().is_empty();
        let later = clinic.book(open_slot());
        let refreshed = feed.refresh().map(|listed| listed.len());
        gateway.release.wait();

        let outcome = cancelling.join().expect("cancel thread");
        (outcome, later, hidden_while_pending, refreshed)
    });

    assert!(hidden_while_pending);
    assert_eq!(refreshed, Ok(2));
    assert!(!outcome.is_cancelled());
    let ids: Vec<_> = feed
        .appointments()
        .iter()
        .map(|appointment| appointment.id)
        .collect();
    assert_eq!(ids, vec![later.id, first.id]);
}

#[test]
fn failed_cancel_reinserts_the_entry_in_date_order() {
    let clinic = clinic();
    let early = clinic.book(open_slot());
    let middle = clinic.book(at(2024, 6, 12, 9, 0));
    let late = clinic.book(at(2024, 6, 13, 9, 0));
    let feed = AppointmentFeed::new(
        Arc::new(clinic.backend.clone()),
        Owner::Patient(clinic.patient.id),
    );
    feed.refresh().expect("refresh");

    clinic.backend.set_offline(true);
    assert!(!feed.cancel(middle.id).is_cancelled());

    let ids: Vec<_> = feed
        .appointments()
        .iter()
        .map(|appointment| appointment.id)
        .collect();
    assert_eq!(ids, vec![early.id, middle.id, late.id]);
}
