//! Booking core for the patient/doctor appointment client.
//!
//! The heart of the crate is [`scheduling`], a pure eligibility validator that every booking
//! call site routes through. [`accounts`] and [`appointments`] hold the glue the client screens
//! drive, talking to the remote API only through the traits in [`gateway`].

pub mod accounts;
pub mod appointments;
pub mod config;
pub mod error;
pub mod gateway;
pub mod locale;
pub mod scheduling;
pub mod telemetry;
pub mod wire;
