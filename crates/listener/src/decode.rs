//! Turning an inbound HTTP request into a [`relay::WebhookNotification`].
//!
//! Decoding never fails: the payload is not schema-validated, so anything the
//! CMS sends is carried through as-is and only the event label matters.

use std::collections::BTreeMap;

use axum::body::Bytes;
use axum::http::HeaderMap;
use relay::EventKind;
use serde_json::Value;
use tracing::warn;

/// Header the legacy single-route design reads the event label from.
pub const GHOST_EVENT_HEADER: &str = "x-ghost-event";

/// Header values never copied into a notification.
const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "proxy-authorization",
    "x-ghost-signature",
];

/// Event bound to a `/webhook/{route}` path segment.
pub fn route_event(route: &str) -> Option<EventKind> {
    match route {
        "published" => Some(EventKind::Published),
        "updated" => Some(EventKind::PublishedEdited),
        "unpublished" => Some(EventKind::Unpublished),
        "deleted" => Some(EventKind::Deleted),
        _ => None,
    }
}

/// Event label carried in the `X-Ghost-Event` header, or empty if absent.
pub fn header_event(headers: &HeaderMap) -> String {
    headers
        .get(GHOST_EVENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Copies request headers into a plain map, redacting credentials.
///
/// Repeated headers keep the last value. Non-UTF-8 values are dropped.
pub fn header_map(headers: &HeaderMap) -> BTreeMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            let name = name.as_str().to_ascii_lowercase();
            if SENSITIVE_HEADERS.contains(&name.as_str()) {
                return Some((name, "<redacted>".to_string()));
            }
            value.to_str().ok().map(|v| (name, v.to_string()))
        })
        .collect()
}

/// Parses the body as JSON, falling back to the raw text.
///
/// An empty body becomes `null`.
pub fn decode_payload(body: &Bytes) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body).unwrap_or_else(|err| {
        warn!(error = %err, bytes = body.len(), "Webhook body is not JSON, keeping raw text");
        Value::String(String::from_utf8_lossy(body).into_owned())
    })
}

#[cfg(test)]
#[path = "decode_tests.rs"]
mod tests;
