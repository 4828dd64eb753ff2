use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::info;

use super::domain::{Appointment, CreateAppointmentRequest};
use crate::accounts::domain::{User, UserId};
use crate::gateway::{AppointmentGateway, GatewayError};
use crate::locale::Locale;
use crate::scheduling::{EligibilityValidator, EligibilityVerdict, ReasonCode, SchedulingRules};

/// Books appointments, admitting only slots the eligibility validator accepts.
pub struct BookingService<G> {
    gateway: Arc<G>,
    validator: Arc<EligibilityValidator>,
}

impl<G> BookingService<G>
where
    G: AppointmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, validator: Arc<EligibilityValidator>) -> Self {
        Self { gateway, validator }
    }

    pub fn gateway(&self) -> &Arc<G> {
        &self.gateway
    }

    pub fn validator(&self) -> &Arc<EligibilityValidator> {
        &self.validator
    }

    pub fn check(&self, slot: NaiveDateTime) -> EligibilityVerdict {
        self.validator.check(slot)
    }

    /// Book `slot` for the signed-in `patient` with the selected doctor.
    pub fn book(
        &self,
        patient: Option<&User>,
        doctor_id: Option<UserId>,
        slot: NaiveDateTime,
    ) -> Result<Appointment, BookingError> {
        let patient = patient.ok_or(BookingError::NotSignedIn)?;
        let doctor_id = doctor_id.ok_or(BookingError::NoDoctorSelected)?;

        self.submit(CreateAppointmentRequest {
            doctor_id,
            patient_id: patient.id,
            date_time: slot,
        })
    }

    /// Validate the requested slot and, only if it is admissible, create the appointment.
    pub fn submit(&self, request: CreateAppointmentRequest) -> Result<Appointment, BookingError> {
        if let Err(reason) = self.validator.check(request.date_time).into_result() {
            info!(
                patient_id = %request.patient_id,
                doctor_id = %request.doctor_id,
                slot = %request.date_time,
                reason = reason.code(),
                "booking rejected"
            );
            return Err(BookingError::Ineligible(reason));
        }

        let appointment = self.gateway.create_appointment(&request)?;
        info!(
            appointment_id = %appointment.id,
            patient_id = %request.patient_id,
            doctor_id = %request.doctor_id,
            slot = %request.date_time,
            "appointment booked"
        );
        Ok(appointment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("no signed-in patient")]
    NotSignedIn,
    #[error("no doctor selected")]
    NoDoctorSelected,
    #[error("slot not bookable: {}", .0.code())]
    Ineligible(ReasonCode),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl BookingError {
    pub fn user_message(&self, locale: Locale, rules: &SchedulingRules) -> String {
        match (self, locale) {
            (Self::NotSignedIn, Locale::English) => "Sign in to book an appointment".to_string(),
            (Self::NotSignedIn, Locale::Spanish) => {
                "Inicia sesión para agendar una cita".to_string()
            }
            (Self::NoDoctorSelected, Locale::English) => "Please select a doctor".to_string(),
            (Self::NoDoctorSelected, Locale::Spanish) => {
                "Por favor selecciona un doctor".to_string()
            }
            (Self::Ineligible(reason), _) => reason.message(locale, rules),
            (Self::Gateway(err), _) => match (err.server_message(), locale) {
                (Some(message), _) => message.to_string(),
                (None, Locale::English) => "Could not book the appointment".to_string(),
                (None, Locale::Spanish) => "Error al agendar la cita".to_string(),
            },
        }
    }
}
