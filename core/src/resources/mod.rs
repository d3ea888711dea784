//! Resource accessors: one per backend collection, each owning a clone of the
//! `ApiClient` it was built with.

mod consultations;
mod doctors;
mod patients;
mod specialties;

pub use consultations::{BookingReceipt, ConsultationResource, IdInput};
pub use doctors::DoctorResource;
pub use patients::{LoginForm, PatientResource, DEFAULT_BIRTH_DATE};
pub use specialties::SpecialtyResource;
