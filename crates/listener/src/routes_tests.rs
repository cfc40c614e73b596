use super::*;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::Request;
use relay::testing::FakeTrigger;
use relay::TriggerError;
use tower::ServiceExt;

fn app(fake: &Arc<FakeTrigger>) -> Router {
    router(Dispatcher::new(fake.clone()))
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_welcome() {
    let fake = Arc::new(FakeTrigger::succeeding());
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, body) = send(app(&fake), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, WELCOME);
}

#[tokio::test]
async fn test_each_bound_route_triggers_once() {
    for route in ["published", "updated", "unpublished", "deleted"] {
        let fake = Arc::new(FakeTrigger::succeeding());

        let (status, body) = send(
            app(&fake),
            post_json(&format!("/webhook/{route}"), r#"{"id":"42"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::OK, "route {route}");
        assert_eq!(body, "Deployment triggered", "route {route}");
        assert_eq!(fake.send_calls(), 1, "route {route}");
    }
}

#[tokio::test]
async fn test_unbound_route_is_ignored() {
    let fake = Arc::new(FakeTrigger::succeeding());

    let (status, body) = send(app(&fake), post_json("/webhook/scheduled", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ignored event");
    assert_eq!(fake.validate_calls(), 0);
    assert_eq!(fake.send_calls(), 0);
}

#[tokio::test]
async fn test_failed_trigger_returns_opaque_500() {
    let fake = Arc::new(FakeTrigger::failing(TriggerError::UpstreamRejected {
        status: 401,
        body: "token railway-secret rejected".to_string(),
    }));

    let (status, body) = send(app(&fake), post_json("/webhook/published", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to trigger deploy");
    assert!(!body.contains("railway-secret"));
}

#[tokio::test]
async fn test_misconfigured_trigger_returns_500() {
    let fake = Arc::new(FakeTrigger::misconfigured(TriggerError::misconfigured([
        "credential",
    ])));

    let (status, body) = send(app(&fake), post_json("/webhook/deleted", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to trigger deploy");
    assert_eq!(fake.send_calls(), 0);
}

#[tokio::test]
async fn test_header_route_triggers_on_recognized_event() {
    let fake = Arc::new(FakeTrigger::succeeding());
    let request = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-ghost-event", "post.published.edited")
        .body(Body::from(r#"{"post":{}}"#))
        .unwrap();

    let (status, body) = send(app(&fake), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Deployment triggered");
    assert_eq!(fake.send_calls(), 1);
}

#[tokio::test]
async fn test_header_route_ignores_unknown_or_missing_event() {
    let fake = Arc::new(FakeTrigger::succeeding());
    let unknown = Request::builder()
        .method("POST")
        .uri("/webhook")
        .header("x-ghost-event", "member.added")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(app(&fake), unknown).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ignored event");

    let (status, body) = send(app(&fake), post_json("/webhook", "{}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ignored event");

    assert_eq!(fake.send_calls(), 0);
}

#[tokio::test]
async fn test_non_json_body_is_still_relayed() {
    let fake = Arc::new(FakeTrigger::succeeding());
    let request = Request::builder()
        .method("POST")
        .uri("/webhook/published")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from("id=42"))
        .unwrap();

    let (status, _) = send(app(&fake), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fake.send_calls(), 1);
}

#[tokio::test]
async fn test_echo_receivers_return_payload() {
    let fake = Arc::new(FakeTrigger::succeeding());

    let (status, body) = send(app(&fake), post_json("/webhook-2", r#"{"id":"7"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    let echoed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        echoed,
        json!({
            "message": "Webhook 2 successfully received.",
            "receivedData": { "id": "7" }
        })
    );
    assert_eq!(fake.send_calls(), 0);
}

#[test]
fn test_outcome_response_statuses() {
    assert_eq!(
        outcome_response(&DeployOutcome::ignored()).status(),
        StatusCode::OK
    );
    assert_eq!(
        outcome_response(&DeployOutcome::triggered()).status(),
        StatusCode::OK
    );
    assert_eq!(
        outcome_response(&DeployOutcome::from_error(
            TriggerError::RequestConstructionFailed {
                reason: "bad url".to_string()
            }
        ))
        .status(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_nested_webhook_path_is_ignored() {
    let fake = Arc::new(FakeTrigger::succeeding());

    let (status, body) = send(app(&fake), post_json("/webhook/post/published", "{}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "Ignored event");
    assert_eq!(fake.send_calls(), 0);
}

struct PanickingTrigger;

#[async_trait::async_trait]
impl relay::DeployTrigger for PanickingTrigger {
    fn strategy(&self) -> &'static str {
        "panicking"
    }

    fn validate(&self) -> Result<(), TriggerError> {
        Ok(())
    }

    async fn send(&self) -> Result<(), TriggerError> {
        panic!("trigger blew up");
    }
}

#[tokio::test]
async fn test_panicking_dispatch_returns_500() {
    let app = router(Dispatcher::new(Arc::new(PanickingTrigger)));

    let (status, body) = send(app, post_json("/webhook/published", "{}")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Failed to trigger deploy");
}
