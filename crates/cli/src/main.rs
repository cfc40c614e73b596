//! Ghost deploy relay entry point.
//!
//! This binary is the composition root for the whole relay. Responsibilities:
//!
//! 1. **Parse configuration**: flags and environment variables, read once.
//! 2. **Wire observability**: `tracing-subscriber` with a pretty or JSON
//!    layer and an optional OpenTelemetry OTLP exporter.
//! 3. **Construct infrastructure**: one shared `reqwest::Client` and the
//!    trigger for the configured strategy:
//!    - `redeploy`: [`railway::RedeployTrigger`]
//!    - `deploy`: [`railway::ServiceDeployTrigger`]
//!    - `workflow`: [`github::WorkflowDispatchTrigger`]
//! 4. **Serve**: bind the listener and run until SIGINT/SIGTERM.

mod config;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use relay::{DeployTrigger, Dispatcher};
use tokio::signal;
use tracing::{info, warn};

use crate::config::{Config, Strategy};

const USER_AGENT: &str = concat!("ghost-deploy-relay/", env!("CARGO_PKG_VERSION"));

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let telemetry = telemetry::init(config.log_format, config.otlp_endpoint.as_deref())?;

    let result = run(config).await;

    telemetry.shutdown();
    result
}

async fn run(config: Config) -> Result<()> {
    let http = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to build HTTP client")?;

    let deploy = build_trigger(&config, http);
    if let Err(err) = deploy.validate() {
        warn!(
            strategy = deploy.strategy(),
            diagnostic = %err,
            "Deploy target incomplete; recognized events will fail until it is configured"
        );
    }
    info!(
        strategy = deploy.strategy(),
        timeout_secs = config.timeout_secs,
        "Deploy trigger configured"
    );

    let app = listener::router(Dispatcher::new(deploy));
    let tcp = listener::bind(config.listen_addr()).await?;
    listener::serve(tcp, app, shutdown_signal()).await?;

    info!("Server stopped");
    Ok(())
}

/// Builds the one trigger this process uses.
fn build_trigger(config: &Config, http: reqwest::Client) -> Arc<dyn DeployTrigger> {
    let timeout = config.timeout();
    match config.strategy {
        Strategy::Redeploy => Arc::new(railway::RedeployTrigger::new(
            http,
            config.railway_target(),
            timeout,
        )),
        Strategy::Deploy => Arc::new(railway::ServiceDeployTrigger::new(
            http,
            config.railway_target(),
            timeout,
        )),
        Strategy::Workflow => Arc::new(github::WorkflowDispatchTrigger::new(
            http,
            config.workflow_target(),
            timeout,
        )),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
