//! Async client core for the appointment-booking API.
//!
//! # Overview
//! `ApiClient` issues requests against a fixed base URL and returns decoded
//! JSON or a normalized `ApiError`. Four resource accessors (patients,
//! doctors, specialties, consultations) sit on top of it and reconcile the
//! backend's snake_case English field names with the UI's camelCase French
//! ones.
//!
//! # Design
//! - `ApiClient` is stateless apart from its base URL and transport; every
//!   accessor is handed its own clone at construction.
//! - The network sits behind the `Transport` trait. `ReqwestTransport` is the
//!   production implementation; tests plug in a fake one.
//! - No retries, timeouts or cancellation. Callers wrap calls if they need
//!   any of those.
//!
//! ```rust,no_run
//! use rdv_core::{ApiClient, ClientConfig};
//!
//! # async fn example() -> Result<(), rdv_core::ApiError> {
//! let client = ApiClient::from_config(&ClientConfig::from_env());
//! let open_slots = client.consultations().list_available().await?;
//! if let Some(slot) = open_slots.first() {
//!     client.consultations().book(slot.id, 42, "Check-up").await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod resources;
pub mod types;

#[cfg(test)]
mod testing;

pub use client::ApiClient;
pub use config::ClientConfig;
pub use error::{error_message, ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use resources::{
    BookingReceipt, ConsultationResource, DoctorResource, IdInput, LoginForm, PatientResource,
    SpecialtyResource, DEFAULT_BIRTH_DATE,
};
pub use types::{Consultation, Doctor, NewPatient, Patient, Slot, Specialty};
