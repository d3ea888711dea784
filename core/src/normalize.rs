//! Field-name reconciliation between the API and UI naming conventions.
//!
//! The backend speaks snake_case English (`specialite_id`, `last_name`,
//! `name`, `doctor_id`); the UI speaks camelCase French (`specialiteId`,
//! `nom`, `medecinId`). Each entity gets a `Raw*` shape accepting either
//! spelling and one mapping function with the same rule:
//!
//! - the API field wins when present, the UI field is the fallback;
//! - both spellings are filled in the result;
//! - a missing value never fails: ids become `0`, names `""`.
//!
//! A normalized record serializes to a `Raw*` that maps back to itself.

use serde::{Deserialize, Deserializer};

use crate::types::{Consultation, Doctor, Specialty};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDoctor {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub specialite_id: Option<i64>,
    #[serde(default, rename = "specialiteId")]
    pub specialite_id_ui: Option<i64>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub nom: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub prenom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawSpecialty {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub nom: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConsultation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub hour: Option<String>,
    #[serde(default)]
    pub doctor_id: Option<i64>,
    #[serde(default, rename = "medecinId")]
    pub medecin_id: Option<i64>,
    /// Outer `None`: field absent. `Some(None)`: explicit `null`.
    #[serde(default, deserialize_with = "present")]
    pub patient_id: Option<Option<i64>>,
    #[serde(default, rename = "patientId")]
    pub patient_id_alias: Option<i64>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub motif: Option<String>,
}

/// Distinguish an explicit `null` from a missing field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub fn normalize_doctor(raw: RawDoctor) -> Doctor {
    let specialty_id = raw.specialite_id.or(raw.specialite_id_ui).unwrap_or_default();
    let last_name = raw.last_name.or(raw.nom).unwrap_or_default();
    let first_name = raw.first_name.or(raw.prenom).unwrap_or_default();
    Doctor {
        id: raw.id.unwrap_or_default(),
        specialty_id,
        nom: last_name.clone(),
        prenom: first_name.clone(),
        api_specialty_id: specialty_id,
        last_name,
        first_name,
    }
}

pub fn normalize_specialty(raw: RawSpecialty) -> Specialty {
    let name = raw.name.or(raw.nom).unwrap_or_default();
    Specialty {
        id: raw.id.unwrap_or_default(),
        nom: name.clone(),
        name,
    }
}

pub fn normalize_consultation(raw: RawConsultation) -> Consultation {
    let doctor_id = raw.doctor_id.or(raw.medecin_id).unwrap_or_default();
    // An explicit `patient_id: null` means unbooked, whatever the alias says.
    let patient_id = match raw.patient_id {
        Some(value) => value,
        None => raw.patient_id_alias,
    };
    let reason = raw.reason.or(raw.motif);
    Consultation {
        id: raw.id.unwrap_or_default(),
        date: raw.date.unwrap_or_default(),
        hour: raw.hour,
        doctor_id,
        patient_id,
        reason: reason.clone(),
        medecin_id: doctor_id,
        patient_id_alias: patient_id,
        motif: reason,
    }
}

impl From<RawDoctor> for Doctor {
    fn from(raw: RawDoctor) -> Self {
        normalize_doctor(raw)
    }
}

impl From<RawSpecialty> for Specialty {
    fn from(raw: RawSpecialty) -> Self {
        normalize_specialty(raw)
    }
}

impl From<RawConsultation> for Consultation {
    fn from(raw: RawConsultation) -> Self {
        normalize_consultation(raw)
    }
}
