//! Error types for the appointment API client.
//!
//! # Design
//! Every non-2xx response becomes `Http`, whatever the status. `NotFound` is
//! reserved for client-side searches over a full listing; a 404 from the
//! server stays an `Http { status: 404, .. }`. `Display` of `Http` is the
//! server-supplied message alone so a UI can show it as-is.

use thiserror::Error;

use crate::http::TransportError;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by `ApiClient` and the resource accessors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Input rejected before any request was issued.
    #[error("validation error: {0}")]
    Validation(String),

    /// The login endpoint answered 2xx but reported `success: false`.
    #[error("{0}")]
    Authentication(String),

    /// A mutation answered 2xx but reported `success: false`.
    #[error("{0}")]
    Rejected(String),

    /// A client-side search over a full listing found no match.
    #[error("not found: {0}")]
    NotFound(String),

    /// A 2xx response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be encoded as JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code of an `Http` error, `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Extract a human-readable message from an error response body.
///
/// A JSON `message` field wins over `error`. Bodies that are not JSON, or
/// JSON without either string field, are returned verbatim. An empty body
/// falls back to `HTTP error: <status>`.
pub fn error_message(status: u16, body: &str) -> String {
    if body.trim().is_empty() {
        return format!("HTTP error: {status}");
    }
    if let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) {
        for key in ["message", "error"] {
            if let Some(serde_json::Value::String(msg)) = fields.get(key) {
                if !msg.is_empty() {
                    return msg.clone();
                }
            }
        }
    }
    body.to_string()
}
