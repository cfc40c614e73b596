//! `workflow_dispatch` trigger.

use std::time::Duration;

use async_trait::async_trait;
use relay::{DeployTrigger, TriggerError, ValidatedWorkflowTarget, WorkflowTarget};
use serde::Serialize;
use tracing::{debug, info, instrument};

const ACCEPT: &str = "application/vnd.github+json";
const API_VERSION: &str = "2022-11-28";
const USER_AGENT: &str = concat!("ghost-deploy-relay/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Serialize)]
struct DispatchRequest<'a> {
    #[serde(rename = "ref")]
    git_ref: &'a str,
}

/// `{base}/repos/{owner}/{repo}/actions/workflows/{file}/dispatches`
fn dispatch_url(target: &ValidatedWorkflowTarget) -> String {
    format!(
        "{}/repos/{}/{}/actions/workflows/{}/dispatches",
        target.base_url, target.owner, target.repository, target.workflow_file
    )
}

/// Runs a GitHub Actions workflow against a branch.
///
/// GitHub answers a successful dispatch with `204 No Content`; any 2xx counts.
#[derive(Debug, Clone)]
pub struct WorkflowDispatchTrigger {
    http: reqwest::Client,
    target: WorkflowTarget,
    timeout: Duration,
}

impl WorkflowDispatchTrigger {
    /// Creates the trigger around the shared HTTP client.
    pub fn new(http: reqwest::Client, target: WorkflowTarget, timeout: Duration) -> Self {
        Self {
            http,
            target,
            timeout,
        }
    }

    #[instrument(
        skip_all,
        fields(
            repository = %format!("{}/{}", target.owner, target.repository),
            workflow = %target.workflow_file,
            git_ref = %target.git_ref,
        )
    )]
    async fn dispatch(&self, target: &ValidatedWorkflowTarget) -> Result<(), TriggerError> {
        debug!(credential = %target.credential, "Dispatching workflow");

        let response = self
            .http
            .post(dispatch_url(target))
            .bearer_auth(target.credential.expose())
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header("X-GitHub-Api-Version", API_VERSION)
            .timeout(self.timeout)
            .json(&DispatchRequest {
                git_ref: target.git_ref.as_str(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(relay::http::rejection(response).await);
        }

        info!(status = status.as_u16(), "Workflow dispatch accepted");
        Ok(())
    }
}

#[async_trait]
impl DeployTrigger for WorkflowDispatchTrigger {
    fn strategy(&self) -> &'static str {
        "github-workflow"
    }

    fn validate(&self) -> Result<(), TriggerError> {
        self.target.validate().map(|_| ())
    }

    async fn send(&self) -> Result<(), TriggerError> {
        let target = self.target.validate()?;
        self.dispatch(&target).await
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
