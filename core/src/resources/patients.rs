//! Patient records and the login/registration form.
//!
//! # Design
//! Login and direct creation share `POST /patients`; the login payload is
//! told apart by its camelCase English fields. A login answer is a 2xx even
//! when it fails, so `success` is checked here and turned into
//! `ApiError::Authentication`.

use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::http::Transport;
use crate::types::{NewPatient, Patient};

/// Birth date sent when the caller has none. Placeholder only.
pub const DEFAULT_BIRTH_DATE: &str = "2000-01-01";

const AUTH_FAILED: &str = "Authentication failed";

/// Input to `PatientResource::login_or_register`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Option<String>,
    pub existing_patient_id: Option<i64>,
    pub is_new_patient: bool,
}

impl LoginForm {
    pub fn new_patient(last_name: &str, first_name: &str, birth_date: Option<&str>) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            birth_date: birth_date.map(str::to_string),
            existing_patient_id: None,
            is_new_patient: true,
        }
    }

    pub fn returning(last_name: &str, first_name: &str, patient_id: i64) -> Self {
        Self {
            last_name: last_name.to_string(),
            first_name: first_name.to_string(),
            birth_date: None,
            existing_patient_id: Some(patient_id),
            is_new_patient: false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    last_name: &'a str,
    first_name: &'a str,
    birth_date: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    patient_id: Option<i64>,
    new_patient: &'static str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "patientId")]
    patient_id: Option<i64>,
    #[serde(default)]
    id: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PatientResource<T> {
    api: ApiClient<T>,
}

impl<T: Transport> PatientResource<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub async fn list_all(&self) -> Result<Vec<Patient>> {
        self.api.get("/patients").await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Patient> {
        self.api.get(&format!("/patients/{id}")).await
    }

    pub async fn create(&self, patient: &NewPatient) -> Result<Patient> {
        self.api.post("/patients", patient).await
    }

    /// Log a returning patient in, or register a new one.
    ///
    /// `patientId` is omitted from the payload for a new patient without an
    /// id; a returning patient without one is sent `0`.
    pub async fn login_or_register(&self, form: &LoginForm) -> Result<Patient> {
        let birth_date = form.birth_date.as_deref().unwrap_or(DEFAULT_BIRTH_DATE);
        let patient_id = match (form.existing_patient_id, form.is_new_patient) {
            (Some(id), _) => Some(id),
            (None, true) => None,
            (None, false) => Some(0),
        };
        let request = LoginRequest {
            last_name: &form.last_name,
            first_name: &form.first_name,
            birth_date,
            patient_id,
            new_patient: if form.is_new_patient { "true" } else { "false" },
        };

        let response: LoginResponse = self.api.post("/patients", &request).await?;
        if !response.success {
            let message = response
                .message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| AUTH_FAILED.to_string());
            tracing::debug!(%message, "login rejected");
            return Err(ApiError::Authentication(message));
        }

        let id = response.patient_id.or(response.id).ok_or_else(|| {
            ApiError::Deserialization("login response carries no patient id".to_string())
        })?;
        Ok(Patient {
            id,
            nom: form.last_name.clone(),
            prenom: form.first_name.clone(),
            date_naissance: Some(birth_date.to_string()),
            email: None,
            telephone: None,
        })
    }
}
