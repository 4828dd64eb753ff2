use std::sync::{Arc, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::{Appointment, AppointmentId, AppointmentStatus};
use crate::accounts::domain::{Role, User, UserId};
use crate::gateway::{AppointmentGateway, GatewayError};
use crate::locale::Locale;

/// Whose appointments a feed lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "role", content = "id", rename_all = "snake_case")]
pub enum Owner {
    Patient(UserId),
    Doctor(UserId),
}

impl Owner {
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Patient => Self::Patient(user.id),
            Role::Doctor => Self::Doctor(user.id),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentTally {
    pub active: usize,
    pub canceled: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    Failed(GatewayError),
}

impl CancelOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    pub fn failure_message(&self, locale: Locale) -> Option<String> {
        match self {
            Self::Cancelled => None,
            Self::Failed(err) => Some(match (err.server_message(), locale) {
                (Some(message), _) => message.to_string(),
                (None, Locale::English) => "Could not cancel the appointment".to_string(),
                (None, Locale::Spanish) => "Error al cancelar la cita".to_string(),
            }),
        }
    }
}

/// Cached appointment list for one owner.
///
/// Nothing here reacts to screen lifecycle: the presentation layer calls [`refresh`] when a
/// view mounts, regains focus, or is pulled down.
///
/// [`refresh`]: AppointmentFeed::refresh
pub struct AppointmentFeed<G> {
    gateway: Arc<G>,
    owner: Owner,
    cache: RwLock<Vec<Appointment>>,
}

impl<G> AppointmentFeed<G>
where
    G: AppointmentGateway + 'static,
{
    pub fn new(gateway: Arc<G>, owner: Owner) -> Self {
        Self {
            gateway,
            owner,
            cache: RwLock::new(Vec::new()),
        }
    }

    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Replace the cached list with a fresh fetch. On failure the cache is left untouched.
    pub fn refresh(&self) -> Result<Vec<Appointment>, GatewayError> {
        let fetched = match self.owner {
            Owner::Patient(id) => self.gateway.patient_appointments(id)?,
            Owner::Doctor(id) => self.gateway.doctor_appointments(id)?,
        };
        debug!(owner = ?self.owner, count = fetched.len(), "appointment feed refreshed");
        *self.cache.write().expect("feed lock poisoned") = fetched.clone();
        Ok(fetched)
    }

    pub fn appointments(&self) -> Vec<Appointment> {
        self.cache.read().expect("feed lock poisoned").clone()
    }

    pub fn tally(&self) -> AppointmentTally {
        let cache = self.cache.read().expect("feed lock poisoned");
        cache
            .iter()
            .fold(AppointmentTally::default(), |mut tally, appointment| {
                match appointment.status {
                    AppointmentStatus::Active => tally.active += 1,
                    AppointmentStatus::Canceled => tally.canceled += 1,
                }
                tally
            })
    }

    /// Cancel an appointment, hiding it from the cached list while the call is in flight.
    ///
    /// A failed call puts the hidden entry back without discarding anything a concurrent
    /// refresh stored; a successful one is followed by a refresh so the cache picks up the
    /// server's view of the cancellation.
    pub fn cancel(&self, appointment_id: AppointmentId) -> CancelOutcome {
        let removed = {
            let mut cache = self.cache.write().expect("feed lock poisoned");
            let position = cache
                .iter()
                .position(|appointment| appointment.id == appointment_id);
            position.map(|index| cache.remove(index))
        };

        if let Err(err) = self.gateway.cancel_appointment(appointment_id) {
            warn!(%appointment_id, error = %err, "cancellation failed, restoring entry");
            if let Some(appointment) = removed {
                self.restore(appointment);
            }
            return CancelOutcome::Failed(err);
        }

        if let Err(err) = self.refresh() {
            warn!(%appointment_id, error = %err, "refresh after cancellation failed");
        }
        CancelOutcome::Cancelled
    }

    /// Put back an entry hidden by a failed cancel, keeping date order. A refresh that landed
    /// in the meantime may already have brought it back.
    fn restore(&self, appointment: Appointment) {
        let mut cache = self.cache.write().expect("feed lock poisoned");
        if cache.iter().any(|cached| cached.id == appointment.id) {
            return;
        }
        let key = (appointment.date_time, appointment.id);
        let index = cache
            .iter()
            .position(|cached| (cached.date_time, cached.id) > key)
            .unwrap_or(cache.len());
        cache.insert(index, appointment);
    }
}
