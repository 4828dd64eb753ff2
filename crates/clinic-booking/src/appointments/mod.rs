//! Appointment booking, listing, and cancellation.

pub mod directory;
pub mod domain;
pub mod feed;
pub mod format;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{fallback_doctors, DoctorDirectory, DoctorRoster, RosterSource};
pub use domain::{Appointment, AppointmentId, AppointmentStatus, CreateAppointmentRequest, Page};
pub use feed::{AppointmentFeed, AppointmentTally, CancelOutcome, Owner};
pub use router::appointment_router;
pub use service::{BookingError, BookingService};
