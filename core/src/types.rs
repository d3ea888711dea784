//! Domain records for the appointment API.
//!
//! # Design
//! Records that the backend and the UI name differently (`Doctor`,
//! `Specialty`, `Consultation`) carry both conventions side by side, so code
//! written against either one keeps working. They are only ever produced by
//! the mapping functions in `normalize`, which keep the two sides equal.

use serde::{Deserialize, Serialize};

use crate::normalize::{RawConsultation, RawDoctor, RawSpecialty};

/// A registered patient.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Patient {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    /// `YYYY-MM-DD`.
    #[serde(rename = "dateNaissance", default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// Payload for `POST /patients` when creating a patient record directly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewPatient {
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "dateNaissance", default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

/// A doctor, in both the API and the UI naming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawDoctor")]
pub struct Doctor {
    pub id: i64,
    #[serde(rename = "specialiteId")]
    pub specialty_id: i64,
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "specialite_id")]
    pub api_specialty_id: i64,
    pub last_name: String,
    pub first_name: String,
}

/// A medical specialty, in both the API (`name`) and UI (`nom`) naming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawSpecialty")]
pub struct Specialty {
    pub id: i64,
    pub nom: String,
    pub name: String,
}

/// A consultation slot. Booked exactly when `patient_id` is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawConsultation")]
pub struct Consultation {
    pub id: i64,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM:SS`.
    pub hour: Option<String>,
    pub doctor_id: i64,
    pub patient_id: Option<i64>,
    pub reason: Option<String>,
    #[serde(rename = "medecinId")]
    pub medecin_id: i64,
    #[serde(rename = "patientId")]
    pub patient_id_alias: Option<i64>,
    pub motif: Option<String>,
}

impl Consultation {
    pub fn is_available(&self) -> bool {
        self.patient_id.is_none()
    }

    pub fn is_booked_by(&self, patient_id: i64) -> bool {
        self.patient_id == Some(patient_id)
    }

    /// Time-slot view used by schedule pickers.
    pub fn slot(&self) -> Slot {
        Slot {
            heure: self.hour.clone().unwrap_or_default(),
            disponible: self.is_available(),
        }
    }
}

/// A time slot as displayed in a day schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub heure: String,
    pub disponible: bool,
}
