//! Process configuration.
//!
//! Parsed exactly once in `main` from flags and environment variables, then
//! turned into immutable targets that are injected into the chosen trigger.
//! Nothing else in the process reads the environment.
//!
//! Deployment settings default to empty rather than being required: a relay
//! with a missing token still starts, logs a warning, and answers every
//! recognized event with a 500 until it is configured.

use std::convert::Infallible;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Args, Parser, ValueEnum};
use relay::{Credential, DeployTarget, WorkflowTarget};

/// Which outbound protocol triggers a deploy. Fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Railway GraphQL: look up the latest deployment, then redeploy it.
    Redeploy,
    /// Railway REST: deploy the service directly.
    Deploy,
    /// GitHub Actions: dispatch a workflow.
    Workflow,
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable multi-line output.
    Pretty,
    /// One JSON object per line.
    Json,
}

fn parse_credential(value: &str) -> Result<Credential, Infallible> {
    Ok(Credential::new(value.trim()))
}

/// Relays Ghost webhooks to a deployment trigger.
#[derive(Debug, Clone, Parser)]
#[command(name = "ghost-relay", version, about)]
pub struct Config {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Address to bind.
    #[arg(long, env = "BIND_ADDRESS", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub bind_address: IpAddr,

    /// Outbound trigger strategy.
    #[arg(long, env = "DEPLOY_STRATEGY", value_enum, default_value_t = Strategy::Redeploy)]
    pub strategy: Strategy,

    /// Timeout for each outbound request, in seconds.
    #[arg(
        long,
        env = "DEPLOY_TIMEOUT_SECS",
        default_value_t = 15,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub timeout_secs: u64,

    #[command(flatten)]
    pub railway: RailwayArgs,

    #[command(flatten)]
    pub workflow: WorkflowArgs,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    /// OTLP gRPC endpoint for trace export. Tracing export is off when unset.
    #[arg(long, env = "OTEL_EXPORTER_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

/// Railway settings, used by the `redeploy` and `deploy` strategies.
#[derive(Debug, Clone, Args)]
pub struct RailwayArgs {
    /// Railway API token.
    #[arg(
        id = "railway_token",
        long = "railway-token",
        env = "RAILWAY_API_TOKEN",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true,
        value_parser = parse_credential
    )]
    pub token: Credential,

    /// Railway project id.
    #[arg(long = "railway-project-id", env = "RAILWAY_PROJECT_ID", default_value = "")]
    pub project_id: String,

    /// Railway service id.
    #[arg(long = "railway-service-id", env = "RAILWAY_SERVICE_ID", default_value = "")]
    pub service_id: String,

    /// Railway environment id.
    #[arg(
        long = "railway-environment-id",
        env = "RAILWAY_ENVIRONMENT_ID",
        default_value = ""
    )]
    pub environment_id: String,

    /// Railway GraphQL endpoint (redeploy strategy).
    #[arg(
        long = "railway-graphql-url",
        env = "RAILWAY_GRAPHQL_URL",
        default_value = railway::DEFAULT_GRAPHQL_URL
    )]
    pub graphql_url: String,

    /// Railway REST API base (deploy strategy).
    #[arg(
        id = "railway_api_url",
        long = "railway-api-url",
        env = "RAILWAY_API_URL",
        default_value = railway::DEFAULT_API_URL
    )]
    pub api_url: String,
}

/// GitHub Actions settings, used by the `workflow` strategy.
///
/// Environment names avoid the `GITHUB_*` variables Actions runners set on
/// their own.
#[derive(Debug, Clone, Args)]
pub struct WorkflowArgs {
    /// GitHub token with `actions: write` on the repository.
    #[arg(
        id = "workflow_token",
        long = "workflow-token",
        env = "WORKFLOW_TOKEN",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true,
        value_parser = parse_credential
    )]
    pub token: Credential,

    /// Repository owner.
    #[arg(long = "workflow-owner", env = "WORKFLOW_OWNER", default_value = "")]
    pub owner: String,

    /// Repository name.
    #[arg(long = "workflow-repo", env = "WORKFLOW_REPO", default_value = "")]
    pub repository: String,

    /// Workflow file name, e.g. `deploy.yml`.
    #[arg(long = "workflow-file", env = "WORKFLOW_FILE", default_value = "")]
    pub workflow_file: String,

    /// Branch the workflow runs against.
    #[arg(long = "workflow-ref", env = "WORKFLOW_REF", default_value = "main")]
    pub git_ref: String,

    /// GitHub REST API base.
    #[arg(
        id = "workflow_api_url",
        long = "workflow-api-url",
        env = "WORKFLOW_API_URL",
        default_value = github::DEFAULT_API_URL
    )]
    pub api_url: String,
}

impl Config {
    /// Socket address the server binds.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }

    /// Per-request outbound timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Railway target for the configured strategy.
    ///
    /// The base URL is the GraphQL endpoint for `redeploy` and the REST base
    /// otherwise.
    pub fn railway_target(&self) -> DeployTarget {
        let base_url = match self.strategy {
            Strategy::Redeploy => &self.railway.graphql_url,
            Strategy::Deploy | Strategy::Workflow => &self.railway.api_url,
        };
        DeployTarget {
            base_url: base_url.clone(),
            project_id: self.railway.project_id.trim().to_string(),
            service_id: self.railway.service_id.trim().to_string(),
            environment_id: self.railway.environment_id.trim().to_string(),
            credential: self.railway.token.clone(),
        }
    }

    /// GitHub workflow target.
    pub fn workflow_target(&self) -> WorkflowTarget {
        WorkflowTarget {
            base_url: self.workflow.api_url.clone(),
            owner: self.workflow.owner.trim().to_string(),
            repository: self.workflow.repository.trim().to_string(),
            workflow_file: self.workflow.workflow_file.trim().to_string(),
            git_ref: self.workflow.git_ref.trim().to_string(),
            credential: self.workflow.token.clone(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
