//! Query-then-mutate strategy over the Railway GraphQL API.
//!
//! 1. Look up the most recent deployment of the configured service in the
//!    configured environment.
//! 2. Ask Railway to redeploy that deployment.
//!
//! The two calls are strictly sequential; the mutation needs the id the query
//! returns.

use std::time::Duration;

use async_trait::async_trait;
use relay::{DeployTarget, DeployTrigger, DeploymentId, TriggerError, ValidatedDeployTarget};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{info, instrument, warn};

use crate::client::{RailwayClient, RawResponse};

const LATEST_DEPLOYMENT_QUERY: &str = r#"
query ($serviceId: ID!, $environmentId: ID!) {
  service(id: $serviceId) {
    deployments(environmentId: $environmentId, first: 1) {
      edges {
        node {
          id
          status
        }
      }
    }
  }
}
"#;

const REDEPLOY_MUTATION: &str = r#"
mutation ($deploymentId: String!) {
  deploymentRedeploy(id: $deploymentId) {
    id
    status
  }
}
"#;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct LatestDeploymentData {
    service: Option<ServiceNode>,
}

#[derive(Debug, Deserialize)]
struct ServiceNode {
    deployments: DeploymentConnection,
}

#[derive(Debug, Deserialize)]
struct DeploymentConnection {
    #[serde(default)]
    edges: Vec<DeploymentEdge>,
}

#[derive(Debug, Deserialize)]
struct DeploymentEdge {
    node: DeploymentNode,
}

#[derive(Debug, Deserialize)]
struct DeploymentNode {
    id: String,
    status: Option<String>,
}

/// Rejects a 2xx GraphQL response that still reports errors.
fn reject_graphql_errors<T>(
    raw: &RawResponse,
    parsed: &GraphqlResponse<T>,
) -> Result<(), TriggerError> {
    if parsed.errors.is_empty() {
        return Ok(());
    }
    let messages: Vec<&str> = parsed.errors.iter().map(|e| e.message.as_str()).collect();
    warn!(errors = ?messages, "Railway GraphQL returned errors");
    Err(TriggerError::UpstreamRejected {
        status: raw.status,
        body: raw.body.clone(),
    })
}

/// Pulls the newest deployment id out of a lookup response.
fn latest_deployment_id(raw: &RawResponse) -> Result<DeploymentId, TriggerError> {
    let not_found = || TriggerError::NoDeploymentFound {
        body: raw.body.clone(),
    };

    let parsed: GraphqlResponse<LatestDeploymentData> =
        serde_json::from_str(&raw.body).map_err(|_| not_found())?;
    reject_graphql_errors(raw, &parsed)?;

    let node = parsed
        .data
        .and_then(|data| data.service)
        .and_then(|service| service.deployments.edges.into_iter().next())
        .map(|edge| edge.node)
        .ok_or_else(not_found)?;

    if let Some(status) = &node.status {
        info!(deployment_status = %status, "Latest deployment status");
    }
    DeploymentId::new(node.id).ok_or_else(not_found)
}

// ---------------------------------------------------------------------------
// Trigger
// ---------------------------------------------------------------------------

/// Redeploys the latest Railway deployment of a service.
#[derive(Debug, Clone)]
pub struct RedeployTrigger {
    client: RailwayClient,
    target: DeployTarget,
}

impl RedeployTrigger {
    /// Creates the trigger. `target.base_url` is the GraphQL endpoint.
    pub fn new(http: reqwest::Client, target: DeployTarget, timeout: Duration) -> Self {
        Self {
            client: RailwayClient::new(http, timeout),
            target,
        }
    }

    #[instrument(skip_all, fields(service_id = %target.service_id, environment_id = %target.environment_id))]
    async fn latest_deployment(
        &self,
        target: &ValidatedDeployTarget,
    ) -> Result<DeploymentId, TriggerError> {
        let request = GraphqlRequest {
            query: LATEST_DEPLOYMENT_QUERY,
            variables: json!({
                "serviceId": target.service_id.as_str(),
                "environmentId": target.environment_id.as_str(),
            }),
        };
        let raw = self
            .client
            .post_json(&target.base_url, &target.credential, &request)
            .await?;

        latest_deployment_id(&raw).inspect_err(|err| {
            warn!(diagnostic = %err, "Could not find the latest deployment");
        })
    }

    #[instrument(skip_all, fields(%deployment_id))]
    async fn redeploy(
        &self,
        target: &ValidatedDeployTarget,
        deployment_id: &DeploymentId,
    ) -> Result<(), TriggerError> {
        let request = GraphqlRequest {
            query: REDEPLOY_MUTATION,
            variables: json!({ "deploymentId": deployment_id.as_str() }),
        };
        let raw = self
            .client
            .post_json(&target.base_url, &target.credential, &request)
            .await?;

        let parsed: GraphqlResponse<Value> =
            serde_json::from_str(&raw.body).map_err(|err| TriggerError::UpstreamRejected {
                status: raw.status,
                body: format!("unparseable redeploy response ({err}): {}", raw.body),
            })?;
        reject_graphql_errors(&raw, &parsed)?;

        info!(response = ?parsed.data, "Redeploy accepted");
        Ok(())
    }
}

#[async_trait]
impl DeployTrigger for RedeployTrigger {
    fn strategy(&self) -> &'static str {
        "railway-redeploy"
    }

    fn validate(&self) -> Result<(), TriggerError> {
        self.target.validate().map(|_| ())
    }

    async fn send(&self) -> Result<(), TriggerError> {
        let target = self.target.validate()?;
        let deployment_id = self.latest_deployment(&target).await?;
        info!(%deployment_id, "Found latest deployment");
        self.redeploy(&target, &deployment_id).await
    }
}

#[cfg(test)]
#[path = "graphql_tests.rs"]
mod tests;
