//! Request issuance against the appointment API.
//!
//! # Design
//! `ApiClient` holds only a `base_url` and a transport and carries no mutable
//! state between calls. Each verb is split into `build_request` (pure),
//! `Transport::execute` (the only I/O) and `parse_response` (pure), so the
//! status and decoding rules can be tested without a network.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{error_message, ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse, ReqwestTransport, Transport};
use crate::resources::{ConsultationResource, DoctorResource, PatientResource, SpecialtyResource};

/// Stateless client for the appointment API.
#[derive(Debug, Clone)]
pub struct ApiClient<T = ReqwestTransport> {
    base_url: String,
    transport: T,
}

impl ApiClient<ReqwestTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, ReqwestTransport::default())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }
}

impl<T> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a request for `path` (relative to the base URL, leading `/`).
    pub fn build_request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers,
            body,
        }
    }

    /// Check the status and decode the body. An empty 2xx body decodes as
    /// JSON `null`.
    pub fn parse_response<R: DeserializeOwned>(&self, response: HttpResponse) -> Result<R> {
        check_status(&response)?;
        let body = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

impl<T: Transport> ApiClient<T> {
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let request = self.build_request(HttpMethod::Get, path, None);
        let response = self.execute(request).await?;
        self.parse_response(response)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(HttpMethod::Post, path, body).await
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(HttpMethod::Put, path, body).await
    }

    pub async fn patch<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        self.send_json(HttpMethod::Patch, path, body).await
    }

    /// Issue a DELETE. Any success body is ignored.
    pub async fn delete(&self, path: &str) -> Result<()> {
        let request = self.build_request(HttpMethod::Delete, path, None);
        let response = self.execute(request).await?;
        check_status(&response)
    }

    pub fn patients(&self) -> PatientResource<T>
    where
        T: Clone,
    {
        PatientResource::new(self.clone())
    }

    pub fn doctors(&self) -> DoctorResource<T>
    where
        T: Clone,
    {
        DoctorResource::new(self.clone())
    }

    pub fn specialties(&self) -> SpecialtyResource<T>
    where
        T: Clone,
    {
        SpecialtyResource::new(self.clone())
    }

    pub fn consultations(&self) -> ConsultationResource<T>
    where
        T: Clone,
    {
        ConsultationResource::new(self.clone())
    }

    async fn send_json<B, R>(&self, method: HttpMethod, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let request = self.build_request(method, path, Some(body));
        let response = self.execute(request).await?;
        self.parse_response(response)
    }

    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        let method = request.method;
        let response = self.transport.execute(request).await?;
        tracing::debug!(%method, status = response.status, "received response");
        Ok(response)
    }
}

/// Map a non-2xx status to `ApiError::Http` with the server's message.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    let message = error_message(response.status, &response.body);
    tracing::warn!(status = response.status, %message, "request failed");
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}
