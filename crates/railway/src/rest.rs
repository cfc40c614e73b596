//! Direct deploy-by-service strategy over the Railway REST API.
//!
//! One request, no lookup: Railway is told to build a fresh deployment of the
//! configured service in the configured environment.

use std::time::Duration;

use async_trait::async_trait;
use relay::{DeployTarget, DeployTrigger, TriggerError, ValidatedDeployTarget};
use serde::Serialize;
use tracing::{info, instrument};

use crate::client::RailwayClient;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeployRequest<'a> {
    environment_id: &'a str,
}

/// `{base}/projects/{projectId}/services/{serviceId}/deploy`
fn deploy_url(target: &ValidatedDeployTarget) -> String {
    format!(
        "{}/projects/{}/services/{}/deploy",
        target.base_url, target.project_id, target.service_id
    )
}

/// Creates a new Railway deployment of a service.
#[derive(Debug, Clone)]
pub struct ServiceDeployTrigger {
    client: RailwayClient,
    target: DeployTarget,
}

impl ServiceDeployTrigger {
    /// Creates the trigger. `target.base_url` is the REST API base.
    pub fn new(http: reqwest::Client, target: DeployTarget, timeout: Duration) -> Self {
        Self {
            client: RailwayClient::new(http, timeout),
            target,
        }
    }

    #[instrument(skip_all, fields(project_id = %target.project_id, service_id = %target.service_id))]
    async fn deploy(&self, target: &ValidatedDeployTarget) -> Result<(), TriggerError> {
        let request = DeployRequest {
            environment_id: target.environment_id.as_str(),
        };
        let raw = self
            .client
            .post_json(&deploy_url(target), &target.credential, &request)
            .await?;

        info!(status = raw.status, "Service deploy accepted");
        Ok(())
    }
}

#[async_trait]
impl DeployTrigger for ServiceDeployTrigger {
    fn strategy(&self) -> &'static str {
        "railway-deploy"
    }

    fn validate(&self) -> Result<(), TriggerError> {
        self.target.validate().map(|_| ())
    }

    async fn send(&self) -> Result<(), TriggerError> {
        let target = self.target.validate()?;
        self.deploy(&target).await
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
