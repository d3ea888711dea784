//! Medical specialties.

use crate::client::ApiClient;
use crate::error::Result;
use crate::http::Transport;
use crate::types::Specialty;

#[derive(Debug, Clone)]
pub struct SpecialtyResource<T> {
    api: ApiClient<T>,
}

impl<T: Transport> SpecialtyResource<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self { api }
    }

    /// `GET /specialties`, with `name`/`nom` reconciled.
    pub async fn list_all(&self) -> Result<Vec<Specialty>> {
        self.api.get("/specialties").await
    }
}
