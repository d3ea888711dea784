//! Consultation slots: listing, booking and cancellation.
//!
//! # Design
//! A slot is booked exactly when its `patient_id` is set; there is no status
//! field. Booking and cancelling address the slot through an `id` query
//! parameter. The booking answer comes in several shapes, so it is classified
//! by hand in `BookingReceipt::from_body` rather than by serde.

use serde::Serialize;
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::http::Transport;
use crate::types::Consultation;

/// A patient identifier as it arrives from a form or route parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum IdInput {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for IdInput {
    fn from(value: i64) -> Self {
        IdInput::Int(value)
    }
}

impl From<i32> for IdInput {
    fn from(value: i32) -> Self {
        IdInput::Int(value.into())
    }
}

impl From<u32> for IdInput {
    fn from(value: u32) -> Self {
        IdInput::Int(value.into())
    }
}

impl From<f64> for IdInput {
    fn from(value: f64) -> Self {
        IdInput::Float(value)
    }
}

impl From<&str> for IdInput {
    fn from(value: &str) -> Self {
        IdInput::Text(value.to_string())
    }
}

impl From<String> for IdInput {
    fn from(value: String) -> Self {
        IdInput::Text(value)
    }
}

impl IdInput {
    /// Coerce to a positive integer: numeric strings are parsed, fractions
    /// truncated toward zero.
    pub fn to_positive_id(&self) -> Result<i64> {
        let value = match self {
            IdInput::Int(n) if *n >= 1 => return Ok(*n),
            IdInput::Int(_) => return Err(invalid_id(self)),
            IdInput::Float(f) => *f,
            IdInput::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid_id(self))?,
        };
        if !value.is_finite() {
            return Err(invalid_id(self));
        }
        let truncated = value.trunc();
        if truncated < 1.0 || truncated > i64::MAX as f64 {
            return Err(invalid_id(self));
        }
        Ok(truncated as i64)
    }
}

fn invalid_id(input: &IdInput) -> ApiError {
    ApiError::Validation(format!("invalid patient id: {input:?}"))
}

#[derive(Debug, Serialize)]
struct BookingRequest<'a> {
    #[serde(rename = "patientId")]
    patient_id: i64,
    reason: &'a str,
}

const BOOKING_REJECTED: &str = "Booking rejected";

/// What the backend answered to a successful booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingReceipt {
    /// `{"success": true}` without a record.
    Acknowledged,
    /// The updated consultation, with or without a `success` flag.
    Updated(Consultation),
    /// No body.
    Empty,
}

impl BookingReceipt {
    /// Classify a 2xx booking body.
    ///
    /// `success: false` becomes `ApiError::Rejected` with the backend's
    /// message. A record is only recognised when it carries an `id`. Any other
    /// shape is a `Deserialization` error.
    pub fn from_body(body: Value) -> Result<Self> {
        let fields = match body {
            Value::Null => return Ok(BookingReceipt::Empty),
            Value::Object(fields) => fields,
            other => {
                return Err(ApiError::Deserialization(format!(
                    "unexpected booking response: {other}"
                )))
            }
        };

        if let Some(flag) = fields.get("success") {
            if flag.as_bool() != Some(true) {
                let message = ["message", "error"]
                    .iter()
                    .find_map(|key| fields.get(*key).and_then(Value::as_str))
                    .filter(|m| !m.is_empty())
                    .unwrap_or(BOOKING_REJECTED)
                    .to_string();
                tracing::debug!(%message, "booking rejected");
                return Err(ApiError::Rejected(message));
            }
        }

        if fields.get("id").is_some_and(Value::is_i64) {
            let consultation = serde_json::from_value(Value::Object(fields))
                .map_err(|e| ApiError::Deserialization(e.to_string()))?;
            return Ok(BookingReceipt::Updated(consultation));
        }
        if fields.contains_key("success") {
            return Ok(BookingReceipt::Acknowledged);
        }
        Err(ApiError::Deserialization(format!(
            "unexpected booking response: {}",
            Value::Object(fields)
        )))
    }
}

#[derive(Debug, Clone)]
pub struct ConsultationResource<T> {
    api: ApiClient<T>,
}

impl<T: Transport> ConsultationResource<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    pub async fn list_all(&self) -> Result<Vec<Consultation>> {
        self.api.get("/consultations").await
    }

    pub async fn list_by_patient(&self, patient_id: i64) -> Result<Vec<Consultation>> {
        self.api.get(&format!("/consultations?patientId={patient_id}")).await
    }

    /// Same endpoint as `list_all`, keeping only unbooked slots.
    pub async fn list_available(&self) -> Result<Vec<Consultation>> {
        let mut consultations = self.list_all().await?;
        consultations.retain(Consultation::is_available);
        Ok(consultations)
    }

    /// Book `consultation_id` for a patient. Invalid ids are rejected before
    /// any request is sent.
    pub async fn book(
        &self,
        consultation_id: i64,
        patient_id: impl Into<IdInput>,
        reason: &str,
    ) -> Result<BookingReceipt> {
        let patient_id = patient_id.into().to_positive_id()?;
        let body = BookingRequest { patient_id, reason };
        tracing::debug!(consultation_id, patient_id, "booking consultation");
        let answer: Value = self
            .api
            .put(&format!("/consultations?id={consultation_id}"), &body)
            .await?;
        BookingReceipt::from_body(answer)
    }

    /// Release a booking. The slot stays, with its patient cleared.
    pub async fn cancel(&self, consultation_id: i64) -> Result<()> {
        self.api
            .delete(&format!("/consultations?id={consultation_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::http::HttpMethod;
    use crate::testing::{fake_client, BASE_URL};

    const LISTING: &str = r#"[
        {"id":1,"date":"2026-11-02","hour":"09:00:00","doctor_id":1,"patient_id":null},
        {"id":2,"date":"2026-11-02","hour":"09:30:00","doctor_id":1,"patient_id":5,"reason":"Suivi"},
        {"id":3,"date":"2026-11-03","doctor_id":2}
    ]"#;

    #[test]
    fn id_coercion() {
        assert_eq!(IdInput::from(12).to_positive_id().unwrap(), 12);
        assert_eq!(IdInput::from(" 12 ").to_positive_id().unwrap(), 12);
        assert_eq!(IdInput::from(3.9).to_positive_id().unwrap(), 3);
        assert_eq!(IdInput::from("7.5").to_positive_id().unwrap(), 7);
        assert_eq!(IdInput::from(1u32).to_positive_id().unwrap(), 1);
    }

    #[test]
    fn large_integer_ids_pass_through_unchanged() {
        let id = 9_007_199_254_740_993i64;
        assert_eq!(IdInput::from(id).to_positive_id().unwrap(), id);
        assert_eq!(IdInput::from(i64::MAX).to_positive_id().unwrap(), i64::MAX);
    }

    #[test]
    fn id_coercion_rejects_non_positive_and_garbage() {
        for input in [
            IdInput::from(0),
            IdInput::from(-4),
            IdInput::from(0.5),
            IdInput::from(f64::NAN),
            IdInput::from(f64::INFINITY),
            IdInput::from(""),
            IdInput::from("abc"),
            IdInput::from("-2"),
        ] {
            let err = input.to_positive_id().unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)), "{input:?}");
        }
    }

    #[tokio::test]
    async fn invalid_patient_id_never_reaches_network() {
        let (client, transport) = fake_client();
        let consultations = client.consultations();

        for bad in [IdInput::from(0), IdInput::from("x"), IdInput::from(f64::NAN)] {
            let err = consultations.book(1, bad, "Suivi").await.unwrap_err();
            assert!(matches!(err, ApiError::Validation(_)));
        }
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn book_puts_patient_and_reason() {
        let (client, transport) = fake_client();
        transport.reply(200, r#"{"success":true}"#);

        let receipt = client.consultations().book(3, "8", "Douleur dorsale").await.unwrap();
        assert_eq!(receipt, BookingReceipt::Acknowledged);

        let req = &transport.requests()[0];
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, format!("{BASE_URL}/consultations?id=3"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"patientId": 8, "reason": "Douleur dorsale"}));
    }

    #[tokio::test]
    async fn book_accepts_updated_record_or_empty_body() {
        let (client, transport) = fake_client();
        transport
            .reply(200, r#"{"id":3,"date":"2026-11-03","doctor_id":2,"patient_id":8}"#)
            .reply(204, "");

        let receipt = client.consultations().book(3, 8, "").await.unwrap();
        match receipt {
            BookingReceipt::Updated(c) => assert!(c.is_booked_by(8)),
            other => panic!("unexpected receipt: {other:?}"),
        }
        let receipt = client.consultations().book(3, 8, "").await.unwrap();
        assert_eq!(receipt, BookingReceipt::Empty);
    }

    #[tokio::test]
    async fn book_keeps_record_sent_alongside_success_flag() {
        let (client, transport) = fake_client();
        transport.reply(
            200,
            r#"{"success":true,"id":3,"date":"2026-11-03","doctor_id":2,"patient_id":8,"reason":"x"}"#,
        );

        match client.consultations().book(3, 8, "x").await.unwrap() {
            BookingReceipt::Updated(c) => {
                assert_eq!(c.id, 3);
                assert!(c.is_booked_by(8));
                assert_eq!(c.motif.as_deref(), Some("x"));
            }
            other => panic!("unexpected receipt: {other:?}"),
        }
    }

    #[tokio::test]
    async fn book_surfaces_backend_rejection() {
        let (client, transport) = fake_client();
        transport
            .reply(200, r#"{"success":false,"message":"Creneau deja reserve"}"#)
            .reply(200, r#"{"success":false}"#);

        let err = client.consultations().book(3, 8, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Creneau deja reserve"));
        assert_eq!(err.to_string(), "Creneau deja reserve");

        let err = client.consultations().book(3, 8, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(ref m) if m == "Booking rejected"));
    }

    #[tokio::test]
    async fn book_rejects_body_without_id_or_flag() {
        let (client, transport) = fake_client();
        transport.reply(200, r#"{"status":"ok"}"#).reply(200, "[1,2]");

        let err = client.consultations().book(3, 8, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
        let err = client.consultations().book(3, 8, "x").await.unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[tokio::test]
    async fn list_available_filters_booked_slots() {
        let (client, transport) = fake_client();
        transport.reply(200, LISTING);

        let available = client.consultations().list_available().await.unwrap();
        let ids: Vec<i64> = available.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(transport.requests()[0].url, format!("{BASE_URL}/consultations"));
    }

    #[tokio::test]
    async fn list_by_patient_and_cancel_use_query_parameters() {
        let (client, transport) = fake_client();
        transport.reply(200, "[]").reply(204, "");

        let consultations = client.consultations();
        consultations.list_by_patient(5).await.unwrap();
        consultations.cancel(2).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, format!("{BASE_URL}/consultations?patientId=5"));
        assert_eq!(requests[1].method, HttpMethod::Delete);
        assert_eq!(requests[1].url, format!("{BASE_URL}/consultations?id=2"));
    }

    #[tokio::test]
    async fn cancel_unknown_slot_is_http_404() {
        let (client, transport) = fake_client();
        transport.reply(404, r#"{"error":"consultation not found"}"#);

        let err = client.consultations().cancel(99).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
