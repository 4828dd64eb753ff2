use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;

use super::directory::DoctorDirectory;
use super::domain::{AppointmentId, CreateAppointmentRequest};
use super::service::{BookingError, BookingService};
use crate::accounts::domain::UserId;
use crate::gateway::{AppointmentGateway, GatewayError};
use crate::locale::Locale;

pub(crate) struct AppointmentRoutes<G> {
    service: Arc<BookingService<G>>,
    directory: Arc<DoctorDirectory<G>>,
    locale: Locale,
}

impl<G> Clone for AppointmentRoutes<G> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            directory: self.directory.clone(),
            locale: self.locale,
        }
    }
}

impl<G> AppointmentRoutes<G> {
    pub(crate) fn new(
        service: Arc<BookingService<G>>,
        directory: Arc<DoctorDirectory<G>>,
        locale: Locale,
    ) -> Self {
        Self {
            service,
            directory,
            locale,
        }
    }
}

/// Booking endpoints mirroring the remote API, served from any [`AppointmentGateway`].
pub fn appointment_router<G>(
    service: Arc<BookingService<G>>,
    directory: Arc<DoctorDirectory<G>>,
    locale: Locale,
) -> Router
where
    G: AppointmentGateway + 'static,
{
    Router::new()
        .route("/api/v1/appointments", post(create_handler::<G>))
        .route(
            "/api/v1/appointments/patient/:patient_id",
            get(patient_list_handler::<G>),
        )
        .route(
            "/api/v1/appointments/doctor/:doctor_id",
            get(doctor_list_handler::<G>),
        )
        .route(
            "/api/v1/appointments/:appointment_id/cancel",
            patch(cancel_handler::<G>),
        )
        .route("/api/v1/doctors", get(doctors_handler::<G>))
        .with_state(AppointmentRoutes::new(service, directory, locale))
}

pub(crate) async fn create_handler<G>(
    State(routes): State<AppointmentRoutes<G>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Response
where
    G: AppointmentGateway + 'static,
{
    match routes.service.submit(request) {
        Ok(appointment) => (StatusCode::CREATED, Json(appointment)).into_response(),
        Err(BookingError::Ineligible(reason)) => {
            let rules = routes.service.validator().rules();
            let payload = json!({
                "error": reason.message(routes.locale, rules),
                "reason": reason,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(BookingError::Gateway(err)) => gateway_error_response(err),
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn patient_list_handler<G>(
    State(routes): State<AppointmentRoutes<G>>,
    Path(patient_id): Path<u64>,
) -> Response
where
    G: AppointmentGateway + 'static,
{
    match routes
        .service
        .gateway()
        .patient_appointments(UserId(patient_id))
    {
        Ok(appointments) => (StatusCode::OK, Json(appointments)).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn doctor_list_handler<G>(
    State(routes): State<AppointmentRoutes<G>>,
    Path(doctor_id): Path<u64>,
) -> Response
where
    G: AppointmentGateway + 'static,
{
    match routes
        .service
        .gateway()
        .doctor_appointments(UserId(doctor_id))
    {
        Ok(appointments) => (StatusCode::OK, Json(appointments)).into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn cancel_handler<G>(
    State(routes): State<AppointmentRoutes<G>>,
    Path(appointment_id): Path<u64>,
) -> Response
where
    G: AppointmentGateway + 'static,
{
    match routes
        .service
        .gateway()
        .cancel_appointment(AppointmentId(appointment_id))
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => gateway_error_response(err),
    }
}

pub(crate) async fn doctors_handler<G>(State(routes): State<AppointmentRoutes<G>>) -> Response
where
    G: AppointmentGateway + 'static,
{
    (StatusCode::OK, Json(routes.directory.load())).into_response()
}

/// Forwards 4xx/5xx rejections as-is; anything else the upstream sent becomes 502.
pub(crate) fn gateway_error_response(err: GatewayError) -> Response {
    let status = match &err {
        GatewayError::Network(_) => StatusCode::BAD_GATEWAY,
        GatewayError::Rejected { status, .. } => StatusCode::from_u16(*status)
            .ok()
            .filter(|status| status.is_client_error() || status.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    };
    let message = err
        .server_message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    (status, Json(json!({ "error": message }))).into_response()
}
