use super::*;

use serde_json::json;

#[test]
fn test_credential_debug_and_display_never_print_the_secret() {
    let credential = Credential::new("super-secret-token");

    assert_eq!(format!("{credential}"), "<redacted:18 chars>");
    assert_eq!(format!("{credential:?}"), "Credential(<redacted:18 chars>)");
    assert!(!format!("{credential:?}").contains("super-secret"));
}

#[test]
fn test_credential_empty_and_whitespace_are_empty() {
    assert!(Credential::default().is_empty());
    assert!(Credential::new("   ").is_empty());
    assert_eq!(format!("{}", Credential::default()), "<empty>");
}

#[test]
fn test_event_kind_recognizes_every_label_in_the_set() {
    for kind in EventKind::ALL {
        assert_eq!(EventKind::from_label(kind.label()), Some(kind));
    }
}

#[test]
fn test_event_kind_rejects_unknown_and_near_miss_labels() {
    for label in ["", "post.added", "POST.PUBLISHED", "post.published ", "page.published"] {
        assert_eq!(EventKind::from_label(label), None, "label {label:?}");
    }
}

#[test]
fn test_notification_reports_its_event_kind() {
    let n = WebhookNotification::new("post.deleted", BTreeMap::new(), json!({"id": "1"}));
    assert_eq!(n.event_kind(), Some(EventKind::Deleted));
    assert_eq!(n.payload(), &json!({"id": "1"}));

    let ignored = WebhookNotification::new("member.added", BTreeMap::new(), Value::Null);
    assert_eq!(ignored.event_kind(), None);
}

#[test]
fn test_notifications_get_distinct_delivery_ids() {
    let a = WebhookNotification::new("post.published", BTreeMap::new(), Value::Null);
    let b = WebhookNotification::new("post.published", BTreeMap::new(), Value::Null);
    assert_ne!(a.delivery_id(), b.delivery_id());
}

#[test]
fn test_outcome_ignored_is_a_success() {
    let outcome = DeployOutcome::ignored();
    assert!(outcome.succeeded());
    assert_eq!(outcome.status_code(), Some(200));
    assert_eq!(outcome.message(), "ignored");
    assert!(outcome.diagnostic().is_none());
}

#[test]
fn test_outcome_from_misconfiguration() {
    let outcome = DeployOutcome::from_error(TriggerError::misconfigured(["service_id"]));
    assert!(!outcome.succeeded());
    assert_eq!(outcome.kind(), OutcomeKind::Misconfigured);
    assert_eq!(outcome.status_code(), Some(500));
    assert_eq!(outcome.message(), "misconfigured");
}

#[test]
fn test_outcome_from_upstream_failure() {
    let outcome = DeployOutcome::from_error(TriggerError::UpstreamUnreachable {
        reason: "timed out".to_string(),
    });
    assert!(!outcome.succeeded());
    assert_eq!(outcome.kind(), OutcomeKind::Failed);
    assert_eq!(outcome.status_code(), Some(500));
    assert_eq!(outcome.message(), "trigger failed");
    assert!(outcome.diagnostic().is_some());
}

#[test]
fn test_misconfigured_error_lists_missing_fields() {
    let err = TriggerError::misconfigured(["credential", "project_id"]);
    assert_eq!(
        err.to_string(),
        "Deploy target misconfigured: missing credential, project_id"
    );
}

#[test]
fn test_notification_keeps_headers_and_payload() {
    let headers = BTreeMap::from([
        ("authorization".to_string(), "<redacted>".to_string()),
        ("x-ghost-event".to_string(), "post.published".to_string()),
    ]);

    let notification =
        WebhookNotification::new("post.published", headers.clone(), json!({"id": "42"}));

    assert_eq!(notification.headers(), &headers);
    assert_eq!(notification.payload(), &json!({"id": "42"}));
    assert_eq!(notification.event_kind(), Some(EventKind::Published));
}
