//! Seams to the remote booking API.
//!
//! The HTTP client itself lives outside this crate; services only see these traits, which keeps
//! them testable against [`InMemoryBackend`].

mod memory;

pub use memory::InMemoryBackend;

use crate::accounts::domain::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User, UserId,
};
use crate::appointments::domain::{Appointment, AppointmentId, CreateAppointmentRequest, Page};

/// Failure talking to the booking API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("booking api unreachable: {0}")]
    Network(String),
    #[error("booking api rejected the request with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
}

impl GatewayError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: Some(message.into()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Network(_) => None,
            Self::Rejected { status, .. } => Some(*status),
        }
    }

    /// Message supplied by the server, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Network(_) => None,
            Self::Rejected { message, .. } => message.as_deref(),
        }
    }
}

/// Sign-in and sign-up endpoints.
pub trait AuthGateway: Send + Sync {
    fn login(&self, request: &LoginRequest) -> Result<LoginResponse, GatewayError>;
    fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, GatewayError>;
}

/// Appointment and doctor listing endpoints.
pub trait AppointmentGateway: Send + Sync {
    fn patient_appointments(&self, patient_id: UserId) -> Result<Vec<Appointment>, GatewayError>;
    fn doctor_appointments(&self, doctor_id: UserId) -> Result<Vec<Appointment>, GatewayError>;
    fn patient_appointments_page(
        &self,
        patient_id: UserId,
        page: u32,
        size: u32,
    ) -> Result<Page<Appointment>, GatewayError>;
    fn create_appointment(
        &self,
        request: &CreateAppointmentRequest,
    ) -> Result<Appointment, GatewayError>;
    fn cancel_appointment(&self, appointment_id: AppointmentId) -> Result<(), GatewayError>;
    fn doctors(&self) -> Result<Vec<User>, GatewayError>;
}
