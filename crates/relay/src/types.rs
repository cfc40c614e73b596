//! Shared value types for the relay domain.
//!
//! [`WebhookNotification`] is what the listener hands to the dispatcher;
//! [`DeployOutcome`] is what comes back. Neither outlives a single request.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{DeliveryId, TriggerError};

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// When a delivery was received. Displays as RFC 3339.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// A bearer token for an outbound platform API.
///
/// `Debug` and `Display` never print the secret, only its length, so a
/// credential can sit inside any struct that gets logged. Use
/// [`Credential::expose`] only when building the authorization header.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a raw token. Empty values are allowed here and rejected by target
    /// validation.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns `true` if no token was configured.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Length of the token in characters.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    /// Returns the cleartext token.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            write!(f, "<empty>")
        } else {
            write!(f, "<redacted:{} chars>", self.len())
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Credential({self})")
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// The recognized Ghost event set.
///
/// Any label not listed here is ignored by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    /// `post.published`
    Published,
    /// `post.published.edited`: an already-published post was edited.
    PublishedEdited,
    /// `post.updated`
    Updated,
    /// `post.unpublished`
    Unpublished,
    /// `post.deleted`
    Deleted,
}

impl EventKind {
    /// Every recognized event, in a stable order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Published,
        EventKind::PublishedEdited,
        EventKind::Updated,
        EventKind::Unpublished,
        EventKind::Deleted,
    ];

    /// The Ghost event label for this kind.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Published => "post.published",
            EventKind::PublishedEdited => "post.published.edited",
            EventKind::Updated => "post.updated",
            EventKind::Unpublished => "post.unpublished",
            EventKind::Deleted => "post.deleted",
        }
    }

    /// Looks up a label in the recognized set. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.label() == label)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------

/// One decoded inbound webhook delivery.
///
/// Immutable once built. The payload is whatever JSON the CMS sent; it is
/// logged but never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookNotification {
    delivery_id: DeliveryId,
    received_at: Timestamp,
    event_type: String,
    headers: BTreeMap<String, String>,
    payload: Value,
}

impl WebhookNotification {
    /// Builds a notification stamped with a fresh [`DeliveryId`] and the
    /// current time.
    pub fn new(
        event_type: impl Into<String>,
        headers: BTreeMap<String, String>,
        payload: Value,
    ) -> Self {
        Self {
            delivery_id: DeliveryId::new_random(),
            received_at: Timestamp::now(),
            event_type: event_type.into(),
            headers,
            payload,
        }
    }

    /// Correlation id for this delivery.
    pub fn delivery_id(&self) -> DeliveryId {
        self.delivery_id
    }

    /// When the listener received the request.
    pub fn received_at(&self) -> Timestamp {
        self.received_at
    }

    /// The raw event label, as bound by the route or read from the header.
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Inbound request headers, lower-cased names.
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// The request body.
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// The recognized event this notification carries, if any.
    pub fn event_kind(&self) -> Option<EventKind> {
        EventKind::from_label(&self.event_type)
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Terminal state of one relay attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    /// The event is outside the recognized set; nothing was sent.
    Ignored,
    /// The platform accepted the trigger.
    Triggered,
    /// Required configuration was missing; nothing was sent.
    Misconfigured,
    /// The trigger was attempted and failed.
    Failed,
}

impl OutcomeKind {
    /// Short machine-readable message for this state.
    pub fn message(self) -> &'static str {
        match self {
            OutcomeKind::Ignored => "ignored",
            OutcomeKind::Triggered => "triggered",
            OutcomeKind::Misconfigured => "misconfigured",
            OutcomeKind::Failed => "trigger failed",
        }
    }
}

/// Result of dispatching one notification.
///
/// Built per attempt and consumed immediately by the listener to produce the
/// HTTP response. The diagnostic is for logs only and must never be copied
/// into a response body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeployOutcome {
    kind: OutcomeKind,
    status_code: Option<u16>,
    diagnostic: Option<TriggerError>,
}

impl DeployOutcome {
    /// The event was not in the recognized set.
    pub fn ignored() -> Self {
        Self {
            kind: OutcomeKind::Ignored,
            status_code: Some(200),
            diagnostic: None,
        }
    }

    /// The platform accepted the trigger.
    pub fn triggered() -> Self {
        Self {
            kind: OutcomeKind::Triggered,
            status_code: Some(200),
            diagnostic: None,
        }
    }

    /// Maps a trigger failure onto an outcome. Every failure reports 500.
    pub fn from_error(error: TriggerError) -> Self {
        let kind = if error.is_misconfiguration() {
            OutcomeKind::Misconfigured
        } else {
            OutcomeKind::Failed
        };
        Self {
            kind,
            status_code: Some(500),
            diagnostic: Some(error),
        }
    }

    /// Terminal state.
    pub fn kind(&self) -> OutcomeKind {
        self.kind
    }

    /// `true` for ignored and triggered outcomes.
    pub fn succeeded(&self) -> bool {
        matches!(self.kind, OutcomeKind::Ignored | OutcomeKind::Triggered)
    }

    /// HTTP status the caller should receive.
    pub fn status_code(&self) -> Option<u16> {
        self.status_code
    }

    /// Short message describing the terminal state.
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }

    /// Failure detail, if any.
    pub fn diagnostic(&self) -> Option<&TriggerError> {
        self.diagnostic.as_ref()
    }
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
