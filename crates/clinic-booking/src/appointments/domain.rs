use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::accounts::domain::{Role, User, UserId};
use crate::locale::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AppointmentId(pub u64);

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Active,
    Canceled,
}

impl AppointmentStatus {
    pub const fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::Active, Locale::English) => "Active",
            (Self::Active, Locale::Spanish) => "Activa",
            (Self::Canceled, Locale::English) => "Canceled",
            (Self::Canceled, Locale::Spanish) => "Cancelada",
        }
    }
}

/// Appointment as returned by the booking API. Participants arrive either embedded or as
/// bare display names depending on the endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: AppointmentId,
    #[serde(with = "crate::wire")]
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
}

impl Appointment {
    pub fn is_active(&self) -> bool {
        self.status == AppointmentStatus::Active
    }

    pub fn doctor_display_name(&self) -> Option<&str> {
        self.doctor
            .as_ref()
            .map(|doctor| doctor.name.as_str())
            .or(self.doctor_name.as_deref())
    }

    pub fn patient_display_name(&self) -> Option<&str> {
        self.patient
            .as_ref()
            .map(|patient| patient.name.as_str())
            .or(self.patient_name.as_deref())
    }

    /// Name of the other participant from the point of view of `viewer`.
    pub fn counterpart_name(&self, viewer: Role) -> Option<&str> {
        match viewer {
            Role::Patient => self.doctor_display_name(),
            Role::Doctor => self.patient_display_name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub doctor_id: UserId,
    pub patient_id: UserId,
    #[serde(with = "crate::wire")]
    pub date_time: NaiveDateTime,
}

/// One page of a paginated listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub number: u32,
    pub size: u32,
}

impl<T: Clone> Page<T> {
    /// Slice `items` into the zero-based page `number` of `size` entries.
    pub fn slice(items: &[T], number: u32, size: u32) -> Self {
        let size_usize = size.max(1) as usize;
        let total_elements = items.len() as u64;
        let total_pages = items.len().div_ceil(size_usize) as u32;
        let content = items
            .iter()
            .skip(number as usize * size_usize)
            .take(size_usize)
            .cloned()
            .collect();

        Self {
            content,
            total_elements,
            total_pages,
            number,
            size,
        }
    }

    pub fn is_last(&self) -> bool {
        self.number.saturating_add(1) >= self.total_pages
    }
}
