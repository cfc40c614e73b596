//! Shared HTTP transport for both Railway strategies.

use std::time::Duration;

use relay::{Credential, TriggerError};
use serde::Serialize;
use tracing::debug;

/// Response from Railway that came back with a success status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Thin wrapper around the process-wide [`reqwest::Client`].
///
/// Cloning is cheap: `reqwest::Client` is reference-counted, so every trigger
/// shares one connection pool. The timeout is applied per request.
#[derive(Debug, Clone)]
pub(crate) struct RailwayClient {
    http: reqwest::Client,
    timeout: Duration,
}

impl RailwayClient {
    pub fn new(http: reqwest::Client, timeout: Duration) -> Self {
        Self { http, timeout }
    }

    /// POSTs `body` as JSON with a bearer credential.
    ///
    /// Non-2xx responses become [`TriggerError::UpstreamRejected`] carrying the
    /// status and body. Transport failures map through
    /// `From<reqwest::Error> for TriggerError`.
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        credential: &Credential,
        body: &T,
    ) -> Result<RawResponse, TriggerError> {
        debug!(
            url,
            credential = %credential,
            timeout_ms = self.timeout.as_millis() as u64,
            "Sending Railway request"
        );

        let response = self
            .http
            .post(url)
            .bearer_auth(credential.expose())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(relay::http::rejection(response).await);
        }
        let body = response.text().await?;

        debug!(status = status.as_u16(), "Railway request accepted");
        Ok(RawResponse {
            status: status.as_u16(),
            body,
        })
    }
}
