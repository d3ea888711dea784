use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

/// Doctor as the backend stores it: snake_case English names.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    pub specialite_id: i64,
    pub last_name: String,
    pub first_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Specialty {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Consultation {
    pub id: i64,
    pub date: String,
    pub hour: Option<String>,
    pub doctor_id: i64,
    pub patient_id: Option<i64>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "dateNaissance", default, skip_serializing_if = "Option::is_none")]
    pub date_naissance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephone: Option<String>,
}

#[derive(Deserialize)]
pub struct NewPatient {
    pub nom: String,
    pub prenom: String,
    #[serde(rename = "dateNaissance", default)]
    pub date_naissance: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telephone: Option<String>,
}

/// `newPatient` arrives as a JSON bool or as `"true"`/`"false"`.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Text(String),
}

impl Flag {
    fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Text(s) => s.eq_ignore_ascii_case("true"),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Option<String>,
    pub patient_id: Option<i64>,
    pub new_patient: Flag,
}

/// `POST /patients` serves both the login form and direct creation.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum PatientPost {
    Login(LoginRequest),
    Create(NewPatient),
}

#[derive(Deserialize)]
pub struct BookRequest {
    #[serde(rename = "patientId")]
    pub patient_id: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Deserialize)]
pub struct ConsultationQuery {
    pub id: Option<i64>,
    #[serde(rename = "patientId")]
    pub patient_id: Option<i64>,
}

#[derive(Deserialize)]
pub struct DoctorQuery {
    pub specialty: Option<String>,
}

#[derive(Debug, Default)]
pub struct Store {
    pub specialties: Vec<Specialty>,
    pub doctors: Vec<Doctor>,
    pub consultations: BTreeMap<i64, Consultation>,
    pub patients: BTreeMap<i64, Patient>,
}

impl Store {
    /// A small clinic: three specialties, four doctors, a day of open slots.
    pub fn seeded() -> Self {
        let specialties = ["Cardiologie", "Dermatologie", "Pédiatrie"]
            .iter()
            .zip(1..)
            .map(|(name, id)| Specialty {
                id,
                name: name.to_string(),
            })
            .collect();
        let doctors = [
            (1, 1, "Dupont", "Jean"),
            (2, 1, "Bernard", "Claire"),
            (3, 2, "Moreau", "Luc"),
            (4, 3, "Petit", "Sophie"),
        ]
        .into_iter()
        .map(|(id, specialite_id, last, first)| Doctor {
            id,
            specialite_id,
            last_name: last.to_string(),
            first_name: first.to_string(),
        })
        .collect();
        let consultations = ["09:00:00", "09:30:00", "10:00:00", "10:30:00"]
            .iter()
            .enumerate()
            .flat_map(|(slot, hour)| {
                (1..=2).map(move |doctor_id| {
                    let id = (slot as i64) * 2 + doctor_id;
                    Consultation {
                        id,
                        date: "2026-11-02".to_string(),
                        hour: Some(hour.to_string()),
                        doctor_id,
                        patient_id: None,
                        reason: None,
                    }
                })
            })
            .map(|c| (c.id, c))
            .collect();
        Self {
            specialties,
            doctors,
            consultations,
            patients: BTreeMap::new(),
        }
    }

    fn next_patient_id(&self) -> i64 {
        self.patients.keys().next_back().map_or(1, |id| id + 1)
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::seeded())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    let api = Router::new()
        .route(
            "/consultations",
            get(list_consultations).put(book_consultation).delete(cancel_consultation),
        )
        .route("/doctors", get(list_doctors))
        .route("/specialties", get(list_specialties))
        .route("/patients", get(list_patients).post(post_patient))
        .route("/patients/{id}", get(get_patient))
        .with_state(db);
    Router::new().nest("/api", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

async fn list_consultations(
    State(db): State<Db>,
    Query(query): Query<ConsultationQuery>,
) -> Json<Vec<Consultation>> {
    let store = db.read().await;
    let consultations = store
        .consultations
        .values()
        .filter(|c| query.patient_id.is_none() || c.patient_id == query.patient_id)
        .cloned()
        .collect();
    Json(consultations)
}

async fn book_consultation(
    State(db): State<Db>,
    Query(query): Query<ConsultationQuery>,
    Json(input): Json<BookRequest>,
) -> Response {
    let Some(id) = query.id else {
        return error(StatusCode::BAD_REQUEST, "missing consultation id");
    };
    let mut store = db.write().await;
    let Some(consultation) = store.consultations.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "consultation not found");
    };
    if consultation.patient_id.is_some_and(|p| p != input.patient_id) {
        return error(StatusCode::CONFLICT, "consultation already booked");
    }
    consultation.patient_id = Some(input.patient_id);
    consultation.reason = input.reason;
    tracing::info!(id, patient_id = input.patient_id, "consultation booked");
    Json(json!({ "success": true })).into_response()
}

async fn cancel_consultation(
    State(db): State<Db>,
    Query(query): Query<ConsultationQuery>,
) -> Response {
    let Some(id) = query.id else {
        return error(StatusCode::BAD_REQUEST, "missing consultation id");
    };
    let mut store = db.write().await;
    let Some(consultation) = store.consultations.get_mut(&id) else {
        return error(StatusCode::NOT_FOUND, "consultation not found");
    };
    consultation.patient_id = None;
    consultation.reason = None;
    tracing::info!(id, "consultation cancelled");
    StatusCode::NO_CONTENT.into_response()
}

async fn list_doctors(
    State(db): State<Db>,
    Query(query): Query<DoctorQuery>,
) -> Json<Vec<Doctor>> {
    let store = db.read().await;
    let specialty_id = query.specialty.as_deref().map(|name| {
        store
            .specialties
            .iter()
            .find(|s| s.name.to_lowercase() == name.to_lowercase())
            .map(|s| s.id)
    });
    let doctors = store
        .doctors
        .iter()
        .filter(|d| match specialty_id {
            None => true,
            Some(wanted) => wanted == Some(d.specialite_id),
        })
        .cloned()
        .collect();
    Json(doctors)
}

async fn list_specialties(State(db): State<Db>) -> Json<Vec<Specialty>> {
    Json(db.read().await.specialties.clone())
}

async fn list_patients(State(db): State<Db>) -> Json<Vec<Patient>> {
    Json(db.read().await.patients.values().cloned().collect())
}

async fn get_patient(State(db): State<Db>, Path(id): Path<i64>) -> Response {
    match db.read().await.patients.get(&id) {
        Some(patient) => Json(patient.clone()).into_response(),
        None => error(StatusCode::NOT_FOUND, "patient not found"),
    }
}

async fn post_patient(State(db): State<Db>, Json(input): Json<PatientPost>) -> Response {
    let mut store = db.write().await;
    match input {
        PatientPost::Login(login) if login.new_patient.is_set() => {
            let id = store.next_patient_id();
            store.patients.insert(
                id,
                Patient {
                    id,
                    nom: login.last_name,
                    prenom: login.first_name,
                    date_naissance: login.birth_date,
                    email: None,
                    telephone: None,
                },
            );
            tracing::info!(id, "patient registered");
            Json(json!({ "success": true, "patientId": id })).into_response()
        }
        PatientPost::Login(login) => {
            let matched = login
                .patient_id
                .and_then(|id| store.patients.get(&id))
                .filter(|p| p.nom.eq_ignore_ascii_case(&login.last_name));
            match matched {
                Some(patient) => {
                    Json(json!({ "success": true, "patientId": patient.id })).into_response()
                }
                None => Json(json!({ "success": false, "message": "Patient introuvable" }))
                    .into_response(),
            }
        }
        PatientPost::Create(new) => {
            let id = store.next_patient_id();
            let patient = Patient {
                id,
                nom: new.nom,
                prenom: new.prenom,
                date_naissance: new.date_naissance,
                email: new.email,
                telephone: new.telephone,
            };
            store.patients.insert(id, patient.clone());
            tracing::info!(id, "patient created");
            (StatusCode::CREATED, Json(patient)).into_response()
        }
    }
}
