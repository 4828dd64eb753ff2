use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};

use axum::response::Response;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::accounts::domain::{Role, User, UserId};
use crate::appointments::domain::{Appointment, AppointmentId, CreateAppointmentRequest, Page};
use crate::appointments::{appointment_router, BookingService, DoctorDirectory};
use crate::gateway::{AppointmentGateway, GatewayError, InMemoryBackend};
use crate::locale::Locale;
use crate::scheduling::{EligibilityValidator, FixedClock, SchedulingRules};

pub(super) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

/// Monday 2024-06-10 10:00.
pub(super) fn monday_morning() -> NaiveDateTime {
    at(2024, 6, 10, 10, 0)
}

/// Tuesday 09:00, bookable from [`monday_morning`].
pub(super) fn open_slot() -> NaiveDateTime {
    at(2024, 6, 11, 9, 0)
}

pub(super) fn validator() -> Arc<EligibilityValidator> {
    Arc::new(EligibilityValidator::with_clock(
        SchedulingRules::default(),
        Arc::new(FixedClock(monday_morning())),
    ))
}

pub(super) struct Clinic {
    pub(super) backend: InMemoryBackend,
    pub(super) patient: User,
    pub(super) doctor: User,
}

impl Clinic {
    pub(super) fn book(&self, slot: NaiveDateTime) -> Appointment {
        self.backend
            .create_appointment(&CreateAppointmentRequest {
                doctor_id: self.doctor.id,
                patient_id: self.patient.id,
                date_time: slot,
            })
            .expect("appointment created")
    }
}

pub(super) fn clinic() -> Clinic {
    let backend = InMemoryBackend::with_sample_doctors();
    let patient = backend.seed_user("Ana Torres", "ana@example.com", "secret1", Role::Patient);
    let doctor = backend.doctors().expect("doctors listed")[0].clone();
    Clinic {
        backend,
        patient,
        doctor,
    }
}

pub(super) fn booking_service(backend: &InMemoryBackend) -> BookingService<InMemoryBackend> {
    BookingService::new(Arc::new(backend.clone()), validator())
}

pub(super) fn router_for(backend: &InMemoryBackend, locale: Locale) -> axum::Router {
    let gateway = Arc::new(backend.clone());
    appointment_router(
        Arc::new(BookingService::new(gateway.clone(), validator())),
        Arc::new(DoctorDirectory::new(gateway)),
        locale,
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("body readable");
    if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    }
}

/// Backend whose listing endpoints can be taken down while mutations keep working.
#[derive(Clone)]
pub(super) struct ListingOutage {
    pub(super) backend: InMemoryBackend,
    listings_down: Arc<AtomicBool>,
}

impl ListingOutage {
    pub(super) fn new(backend: InMemoryBackend) -> Self {
        Self {
            backend,
            listings_down: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(super) fn take_listings_down(&self) {
        self.listings_down.store(true, Ordering::SeqCst);
    }

    fn listing_guard(&self) -> Result<(), GatewayError> {
        if self.listings_down.load(Ordering::SeqCst) {
            Err(GatewayError::rejected(503, "listing unavailable"))
        } else {
            Ok(())
        }
    }
}

impl AppointmentGateway for ListingOutage {
    fn patient_appointments(&self, patient_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        self.listing_guard()?;
        self.backend.patient_appointments(patient_id)
    }

    fn doctor_appointments(&self, doctor_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        self.listing_guard()?;
        self.backend.doctor_appointments(doctor_id)
    }

    fn patient_appointments_page(
        &self,
        patient_id: UserId,
        page: u32,
        size: u32,
    ) -> Result<Page<Appointment>, GatewayError> {
        self.listing_guard()?;
        self.backend.patient_appointments_page(patient_id, page, size)
    }

    fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, GatewayError> {
        self.backend.create_appointment(request)
    }

    fn cancel_appointment(&self, appointment_id: AppointmentId) -> Result<(), GatewayError> {
        self.backend.cancel_appointment(appointment_id)
    }

    fn doctors(&self) -> Result<Vec<User>, GatewayError> {
        self.listing_guard()?;
        self.backend.doctors()
    }
}

/// Backend whose cancel call parks until the test releases it, then fails.
pub(super) struct StalledCancel {
    pub(super) backend: InMemoryBackend,
    pub(super) entered: Barrier,
    pub(super) release: Barrier,
}

impl StalledCancel {
    pub(super) fn new(backend: InMemoryBackend) -> Self {
        Self {
            backend,
            entered: Barrier::new(2),
            release: Barrier::new(2),
        }
    }
}

impl AppointmentGateway for StalledCancel {
    fn patient_appointments(&self, patient_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        self.backend.patient_appointments(patient_id)
    }

    fn doctor_appointments(&self, doctor_id: UserId) -> Result<Vec<Appointment>, GatewayError> {
        self.backend.doctor_appointments(doctor_id)
    }

    fn patient_appointments_page(
        &self,
        patient_id: UserId,
        page: u32,
        size: u32,
    ) -> Result<Page<Appointment>, GatewayError> {
        self.backend.patient_appointments_page(patient_id, page, size)
    }

    fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, GatewayError> {
        self.backend.create_appointment(request)
    }

    fn cancel_appointment(&self, _appointment_id: AppointmentId) -> Result<(), GatewayError> {
        self.entered.wait();
        self.release.wait();
        Err(GatewayError::rejected(504, "upstream timeout"))
    }

    fn doctors(&self) -> Result<Vec<User>, GatewayError> {
        self.backend.doctors()
    }
}
