//! Verify normalization and error-message extraction against the JSON test
//! vectors stored in `test-vectors/`.
//!
//! Normalized records are compared as parsed JSON, so field order does not
//! matter. Each normalized record is also fed back through normalization to
//! check it comes out unchanged.

use rdv_core::{error_message, ApiClient, ApiError, Consultation, Doctor, HttpResponse, Specialty};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Normalize `input`, compare with `expected`, then normalize again.
fn check_normalization<T>(case: &Value) -> T
where
    T: DeserializeOwned + Serialize + PartialEq + std::fmt::Debug,
{
    let name = case["name"].as_str().unwrap();
    let record: T = serde_json::from_value(case["input"].clone()).unwrap();
    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json, case["expected"], "{name}: normalized form");

    let again: T = serde_json::from_value(json).unwrap();
    assert_eq!(again, record, "{name}: idempotence");
    record
}

#[test]
fn doctor_test_vectors() {
    for case in load(include_str!("../../test-vectors/doctors.json")) {
        let doctor: Doctor = check_normalization(&case);
        assert_eq!(doctor.specialty_id, doctor.api_specialty_id);
    }
}

#[test]
fn specialty_test_vectors() {
    for case in load(include_str!("../../test-vectors/specialties.json")) {
        let specialty: Specialty = check_normalization(&case);
        assert_eq!(specialty.nom, specialty.name);
    }
}

#[test]
fn consultation_test_vectors() {
    for case in load(include_str!("../../test-vectors/consultations.json")) {
        let name = case["name"].as_str().unwrap().to_string();
        let consultation: Consultation = check_normalization(&case);
        assert_eq!(
            consultation.is_available(),
            case["available"].as_bool().unwrap(),
            "{name}: availability"
        );
    }
}

#[test]
fn error_test_vectors() {
    let client = ApiClient::with_transport("http://localhost:3000/api", ());
    for case in load(include_str!("../../test-vectors/errors.json")) {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let body = case["body"].as_str().unwrap();
        let expected = case["expected_message"].as_str().unwrap();

        assert_eq!(error_message(status, body), expected, "{name}: extracted message");

        let response = HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        };
        match client.parse_response::<Value>(response) {
            Err(ApiError::Http { status: got, message }) => {
                assert_eq!(got, status, "{name}: status");
                assert_eq!(message, expected, "{name}: error message");
            }
            other => panic!("{name}: expected Http error, got {other:?}"),
        }
    }
}
