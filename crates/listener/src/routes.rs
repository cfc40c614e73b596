//! Router and handlers.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use relay::{DeployOutcome, Dispatcher, OutcomeKind, TriggerError, WebhookNotification};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::decode::{decode_payload, header_event, header_map, route_event};

/// Body of `GET /`.
pub const WELCOME: &str = "Welcome to the Webhook Server!";

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

/// Builds the full HTTP surface around a dispatcher.
pub fn router(dispatcher: Dispatcher) -> Router {
    Router::new()
        .route("/", get(welcome))
        .route("/webhook", post(header_webhook))
        .route("/webhook/{*route}", post(route_webhook))
        .route(
            "/webhook-1",
            post(|headers: HeaderMap, body: Bytes| echo(1, headers, body)),
        )
        .route(
            "/webhook-2",
            post(|headers: HeaderMap, body: Bytes| echo(2, headers, body)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { dispatcher })
}

/// Maps an outcome onto the plain-text response the CMS sees.
///
/// The diagnostic never goes into the body; it is already in the logs.
pub fn outcome_response(outcome: &DeployOutcome) -> Response {
    let status = outcome
        .status_code()
        .and_then(|code| StatusCode::from_u16(code).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match outcome.kind() {
        OutcomeKind::Ignored => "Ignored event",
        OutcomeKind::Triggered => "Deployment triggered",
        OutcomeKind::Misconfigured | OutcomeKind::Failed => "Failed to trigger deploy",
    };
    (status, body).into_response()
}

async fn welcome() -> &'static str {
    WELCOME
}

/// `POST /webhook/{*route}`: the event label is bound by the path. Only the
/// single-segment routes in [`route_event`] carry an event.
async fn route_webhook(
    State(state): State<AppState>,
    Path(route): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let label = match route_event(&route) {
        Some(kind) => kind.label().to_string(),
        None => {
            info!(%route, "No event bound to webhook route");
            String::new()
        }
    };
    relay_notification(&state, label, &headers, &body).await
}

/// `POST /webhook`: the event label comes from `X-Ghost-Event`.
async fn header_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let label = header_event(&headers);
    relay_notification(&state, label, &headers, &body).await
}

/// Dispatches on a detached task so a client that hangs up early cannot
/// cancel a trigger that is already in flight.
async fn relay_notification(
    state: &AppState,
    label: String,
    headers: &HeaderMap,
    body: &Bytes,
) -> Response {
    let notification = WebhookNotification::new(label, header_map(headers), decode_payload(body));
    let dispatcher = state.dispatcher.clone();
    let task = tokio::spawn(async move { dispatcher.dispatch(&notification).await });

    let outcome = match task.await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(error = %err, "Dispatch task did not complete");
            DeployOutcome::from_error(TriggerError::Interrupted {
                reason: err.to_string(),
            })
        }
    };
    outcome_response(&outcome)
}

/// Diagnostic receiver: logs what arrived and echoes the payload back.
async fn echo(index: u8, headers: HeaderMap, body: Bytes) -> Json<serde_json::Value> {
    let payload = decode_payload(&body);
    info!(
        receiver = index,
        headers = ?header_map(&headers),
        body = %payload,
        "Echo webhook received"
    );
    Json(json!({
        "message": format!("Webhook {index} successfully received."),
        "receivedData": payload,
    }))
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
