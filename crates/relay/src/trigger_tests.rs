use super::*;

use crate::testing::FakeTrigger;
use crate::OutcomeKind;

#[tokio::test]
async fn test_successful_send_yields_triggered_outcome() {
    let fake = FakeTrigger::succeeding();

    let outcome = trigger(&fake).await;

    assert!(outcome.succeeded());
    assert_eq!(outcome.status_code(), Some(200));
    assert_eq!(outcome.message(), "triggered");
    assert_eq!(fake.send_calls(), 1);
}

#[tokio::test]
async fn test_misconfiguration_short_circuits_before_send() {
    let fake = FakeTrigger::misconfigured(TriggerError::misconfigured(["credential"]));

    let outcome = trigger(&fake).await;

    assert_eq!(outcome.kind(), OutcomeKind::Misconfigured);
    assert_eq!(outcome.status_code(), Some(500));
    assert_eq!(fake.validate_calls(), 1);
    assert_eq!(fake.send_calls(), 0);
}

#[tokio::test]
async fn test_send_failure_keeps_diagnostic() {
    let err = TriggerError::UpstreamRejected {
        status: 404,
        body: r#"{"error":"not found"}"#.to_string(),
    };
    let fake = FakeTrigger::failing(err.clone());

    let outcome = trigger(&fake).await;

    assert!(!outcome.succeeded());
    assert_eq!(outcome.status_code(), Some(500));
    assert_eq!(outcome.message(), "trigger failed");
    assert_eq!(outcome.diagnostic(), Some(&err));
    assert_eq!(fake.send_calls(), 1);
}
