//! `reqwest` failure mapping shared by the HTTP adapters.
//!
//! Enabled by the `http` feature; the domain itself never depends on it.

use tracing::warn;

use crate::TriggerError;

impl From<reqwest::Error> for TriggerError {
    /// Splits transport failures into "never sent" and "sent, no usable
    /// response".
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            TriggerError::RequestConstructionFailed {
                reason: err.to_string(),
            }
        } else if err.is_timeout() {
            TriggerError::UpstreamUnreachable {
                reason: format!("timed out: {err}"),
            }
        } else {
            TriggerError::UpstreamUnreachable {
                reason: err.to_string(),
            }
        }
    }
}

/// Builds the [`TriggerError::UpstreamRejected`] for a non-2xx response.
///
/// The status is kept even if the body cannot be read.
pub async fn rejection(response: reqwest::Response) -> TriggerError {
    let status = response.status().as_u16();
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(status, error = %err, "Could not read rejected response body");
            String::new()
        }
    };
    TriggerError::UpstreamRejected { status, body }
}
