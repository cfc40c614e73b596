//! Error taxonomy for a single deploy-trigger attempt.
//!
//! [`TriggerError`] covers every way a trigger can fail. An ignored event is
//! not an error and never appears here; it is expressed directly as
//! [`crate::DeployOutcome::ignored`].
//!
//! All variants map to the same opaque HTTP 500 at the listener. The variants
//! exist so the diagnostic attached to a [`crate::DeployOutcome`] tells an
//! operator *where* the attempt stopped: before any I/O, before the request was
//! sent, after it was sent but unanswered, or after the platform answered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a deploy trigger did not succeed.
///
/// Serialisable so the diagnostic can be emitted as a structured log field.
/// None of the variants ever carry a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TriggerError {
    /// One or more required configuration values are empty.
    ///
    /// Detected before any outbound I/O. Fatal for the request, never for the
    /// process.
    #[error("Deploy target misconfigured: missing {}", .missing.join(", "))]
    Misconfigured {
        /// Names of the configuration fields that were empty.
        missing: Vec<String>,
    },

    /// The platform answered with a non-success status (or a GraphQL `errors`
    /// array on a 2xx).
    #[error("Upstream rejected the request with status {status}: {body}")]
    UpstreamRejected {
        /// HTTP status returned by the platform.
        status: u16,
        /// Response body as returned, for debugging.
        body: String,
    },

    /// The request was sent but no response arrived (timeout, connection
    /// reset, DNS failure after dispatch).
    #[error("Upstream unreachable: {reason}")]
    UpstreamUnreachable {
        /// Transport-level description of the failure.
        reason: String,
    },

    /// The request could not be built and was never sent.
    #[error("Request construction failed: {reason}")]
    RequestConstructionFailed {
        /// Description of what could not be constructed.
        reason: String,
    },

    /// The trigger attempt stopped before producing a result (the task running
    /// it panicked or was aborted).
    #[error("Trigger attempt interrupted: {reason}")]
    Interrupted {
        /// Description of how the attempt ended.
        reason: String,
    },

    /// The deployment lookup succeeded but named no deployment to redeploy.
    #[error("No deployment id found in lookup response: {body}")]
    NoDeploymentFound {
        /// Lookup response body, for debugging.
        body: String,
    },
}

impl TriggerError {
    /// Builds a [`TriggerError::Misconfigured`] from the names of empty fields.
    pub fn misconfigured<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Misconfigured {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if the error was detected before any outbound I/O.
    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::Misconfigured { .. })
    }
}
