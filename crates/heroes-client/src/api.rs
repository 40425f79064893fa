//! HTTP access to the directory API.

use crate::error::{ClientError, Result};
use crate::filters::Filters;
use async_trait::async_trait;
use heroes_core::{Superhero, SuperheroId, SuperheroInput};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Where the API is expected when no URL is given.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api";

/// Message used when an error response carries no readable message.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Record operations the directory UI needs.
///
/// Implemented over HTTP by [`SuperheroApi`]; tests substitute in-memory
/// backends.
#[async_trait]
pub trait SuperheroBackend: Send + Sync {
    /// List records matching `filters`, newest first.
    async fn list(&self, filters: &Filters) -> Result<Vec<Superhero>>;

    /// Fetch one record.
    async fn get(&self, id: &SuperheroId) -> Result<Superhero>;

    /// Create a record.
    async fn create(&self, data: &SuperheroInput) -> Result<Superhero>;

    /// Replace every field of a record.
    async fn update(&self, id: &SuperheroId, data: &SuperheroInput) -> Result<Superhero>;

    /// Delete a record.
    async fn delete(&self, id: &SuperheroId) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// reqwest-backed client for the directory API.
#[derive(Debug, Clone)]
pub struct SuperheroApi {
    client: Client,
    base_url: String,
}

impl SuperheroApi {
    /// Create a client for [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Self::with_url(DEFAULT_BASE_URL)
    }

    /// Create a client for an API rooted at `base_url` (e.g. `http://host:5000/api`).
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be created.
    pub fn with_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| ClientError::Internal(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// The API root this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Check the service is up, returning its status message.
    ///
    /// # Errors
    /// Returns error if the service is unreachable or unhealthy.
    pub async fn health(&self) -> Result<String> {
        let response = self.client.get(self.url("/health")).send().await?;
        let body: MessageBody = decode(response).await?;
        Ok(body.message.unwrap_or_default())
    }
}

/// Turn a non-success response into `ClientError::Api`.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<MessageBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    tracing::debug!("API returned {}: {}", status, message);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    check(response)
        .await?
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl SuperheroBackend for SuperheroApi {
    async fn list(&self, filters: &Filters) -> Result<Vec<Superhero>> {
        let response = self
            .client
            .get(self.url("/superheroes"))
            .query(&filters.query_pairs())
            .send()
            .await?;
        decode(response).await
    }

    async fn get(&self, id: &SuperheroId) -> Result<Superhero> {
        let response = self
            .client
            .get(self.url(&format!("/superheroes/{id}")))
            .send()
            .await?;
        decode(response).await
    }

    async fn create(&self, data: &SuperheroInput) -> Result<Superhero> {
        let response = self
            .client
            .post(self.url("/superheroes"))
            .json(data)
            .send()
            .await?;
        decode(response).await
    }

    async fn update(&self, id: &SuperheroId, data: &SuperheroInput) -> Result<Superhero> {
        let response = self
            .client
            .put(self.url(&format!("/superheroes/{id}")))
            .json(data)
            .send()
            .await?;
        decode(response).await
    }

    async fn delete(&self, id: &SuperheroId) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&format!("/superheroes/{id}")))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let api = SuperheroApi::with_url("http://localhost:5000/api/").expect("create client");
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/health"), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_default_base_url() {
        let api = SuperheroApi::new().expect("create client");
        assert_eq!(api.base_url(), DEFAULT_BASE_URL);
    }
}
