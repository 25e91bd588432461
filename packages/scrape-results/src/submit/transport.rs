//! Transport seam between the coordinator and the persistence backend.
//!
//! Infrastructure only: the transport sends bytes and reports what came
//! back. Interpreting statuses and bodies is the coordinator's job.

use async_trait::async_trait;
use reqwest::{header, redirect};
use std::time::Duration;
use url::Url;

use crate::config::SubmitConfig;
use crate::credentials::BearerToken;
use crate::error::{ConfigError, ConfigResult, TransportResult};

/// Status and body of an HTTP response, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait BasePersistenceTransport: Send + Sync {
    /// Send one JSON `POST` with a bearer credential.
    ///
    /// Returns `Err` only when no response was received. Implementations
    /// must not retry.
    async fn post_json(
        &self,
        endpoint: &Url,
        token: &BearerToken,
        body: String,
    ) -> TransportResult<TransportResponse>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Redirects are not followed: a 3xx is handed back as-is, so a `POST`
    /// bounced to a login page never turns into a successful `GET`.
    pub fn new(timeout: Duration) -> ConfigResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self { client })
    }

    pub fn from_config(config: &SubmitConfig) -> ConfigResult<Self> {
        Self::new(config.timeout)
    }
}

#[async_trait]
impl BasePersistenceTransport for HttpTransport {
    async fn post_json(
        &self,
        endpoint: &Url,
        token: &BearerToken,
        body: String,
    ) -> TransportResult<TransportResponse> {
        let response = self
            .client
            .post(endpoint.clone())
            .bearer_auth(token.expose())
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        // A body that fails mid-read still leaves us with a status to report.
        let body = response.text().await.unwrap_or_default();

        Ok(TransportResponse { status, body })
    }
}
