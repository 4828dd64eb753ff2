use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::accounts::domain::{Role, User, UserId};
use crate::gateway::AppointmentGateway;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterSource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DoctorRoster {
    pub doctors: Vec<User>,
    pub source: RosterSource,
}

impl DoctorRoster {
    /// Doctor preselected on the booking form.
    pub fn default_selection(&self) -> Option<UserId> {
        self.doctors.first().map(|doctor| doctor.id)
    }
}

/// Roster shown when the doctor listing cannot be fetched.
pub fn fallback_doctors() -> Vec<User> {
    vec![
        User {
            id: UserId(1),
            name: "Juan García".to_string(),
            email: "doctor1@test.com".to_string(),
            role: Role::Doctor,
        },
        User {
            id: UserId(2),
            name: "María López".to_string(),
            email: "doctor2@test.com".to_string(),
            role: Role::Doctor,
        },
    ]
}

pub struct DoctorDirectory<G> {
    gateway: Arc<G>,
    fallback: Vec<User>,
}

impl<G> DoctorDirectory<G>
where
    G: AppointmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_fallback(gateway, fallback_doctors())
    }

    pub fn with_fallback(gateway: Arc<G>, fallback: Vec<User>) -> Self {
        Self { gateway, fallback }
    }

    /// Fetch the doctor listing, substituting the fallback roster when the call fails.
    pub fn load(&self) -> DoctorRoster {
        match self.gateway.doctors() {
            Ok(doctors) => DoctorRoster {
                doctors,
                source: RosterSource::Remote,
            },
            Err(err) => {
                warn!(error = %err, "doctor listing unavailable, using fallback roster");
                DoctorRoster {
                    doctors: self.fallback.clone(),
                    source: RosterSource::Fallback,
                }
            }
        }
    }
}
