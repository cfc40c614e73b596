use super::*;

fn railway_target() -> DeployTarget {
    DeployTarget {
        base_url: "https://backboard.railway.app/graphql/v2".to_string(),
        project_id: "proj-1".to_string(),
        service_id: "svc-1".to_string(),
        environment_id: "env-1".to_string(),
        credential: Credential::new("railway-token"),
    }
}

fn workflow_target() -> WorkflowTarget {
    WorkflowTarget {
        base_url: "https://api.github.com/".to_string(),
        owner: "acme".to_string(),
        repository: "blog".to_string(),
        workflow_file: "deploy.yml".to_string(),
        git_ref: "main".to_string(),
        credential: Credential::new("gh-token"),
    }
}

#[test]
fn test_complete_railway_target_validates() {
    let validated = railway_target().validate().expect("target should be valid");
    assert_eq!(validated.service_id.as_str(), "svc-1");
    assert_eq!(validated.environment_id.as_str(), "env-1");
    assert_eq!(validated.credential.expose(), "railway-token");
}

#[test]
fn test_each_empty_railway_field_is_reported() {
    let cases: [(&str, fn(&mut DeployTarget)); 4] = [
        ("credential", |t| t.credential = Credential::default()),
        ("project_id", |t| t.project_id.clear()),
        ("service_id", |t| t.service_id.clear()),
        ("environment_id", |t| t.environment_id = "  ".to_string()),
    ];

    for (field, blank) in cases {
        let mut target = railway_target();
        blank(&mut target);

        let err = target.validate().expect_err("target should be rejected");
        assert_eq!(err, TriggerError::misconfigured([field]), "field {field}");
    }
}

#[test]
fn test_empty_railway_target_reports_every_field() {
    let err = DeployTarget::default().validate().expect_err("empty target");
    assert_eq!(
        err,
        TriggerError::misconfigured([
            "base_url",
            "credential",
            "project_id",
            "service_id",
            "environment_id",
        ])
    );
}

#[test]
fn test_workflow_target_trims_trailing_slash_from_base() {
    let validated = workflow_target().validate().expect("target should be valid");
    assert_eq!(validated.base_url, "https://api.github.com");
    assert_eq!(validated.workflow_file.as_str(), "deploy.yml");
}

#[test]
fn test_workflow_target_missing_ref_and_token() {
    let mut target = workflow_target();
    target.git_ref.clear();
    target.credential = Credential::default();

    let err = target.validate().expect_err("target should be rejected");
    assert_eq!(err, TriggerError::misconfigured(["credential", "git_ref"]));
}

#[test]
fn test_target_debug_output_redacts_credential() {
    let rendered = format!("{:?}", railway_target());
    assert!(!rendered.contains("railway-token"));
    assert!(rendered.contains("<redacted:13 chars>"));
}
