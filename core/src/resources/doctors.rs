//! Doctors, normalized to carry both naming conventions.
//!
//! # Design
//! The backend exposes no single-doctor endpoint; `get_by_id` searches the
//! full listing and reports a miss as `ApiError::NotFound`.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::http::Transport;
use crate::types::Doctor;

/// Doctors, always returned with both naming conventions filled.
#[derive(Debug, Clone)]
pub struct DoctorResource<T> {
    api: ApiClient<T>,
}

impl<T: Transport> DoctorResource<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub async fn list_all(&self) -> Result<Vec<Doctor>> {
        self.api.get("/doctors").await
    }

    /// The backend has no single-doctor endpoint, so this searches the full
    /// listing.
    pub async fn get_by_id(&self, id: i64) -> Result<Doctor> {
        let doctors = self.list_all().await?;
        match doctors.into_iter().find(|d| d.id == id) {
            Some(doctor) => Ok(doctor),
            None => {
                tracing::debug!(id, "doctor missing from listing");
                Err(ApiError::NotFound(format!("doctor {id}")))
            }
        }
    }

    pub async fn list_by_specialty(&self, specialty_name: &str) -> Result<Vec<Doctor>> {
        let path = format!("/doctors?specialty={}", urlencoding::encode(specialty_name));
        self.api.get(&path).await
    }
}
