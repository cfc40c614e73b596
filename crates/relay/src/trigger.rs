//! The deploy-trigger port and the per-invocation state machine that drives it.
//!
//! Infrastructure crates implement [`DeployTrigger`]; [`trigger`] runs one
//! attempt through
//! `Validating → {Misconfigured | Dispatching → {Succeeded | Failed}}`.
//! Validation always completes before any outbound I/O starts.

use async_trait::async_trait;
use tracing::{error, info, instrument, warn};

use crate::{DeployOutcome, TriggerError};

/// Something that can ask a hosting platform to deploy.
///
/// One implementation per strategy (Railway redeploy, Railway deploy, GitHub
/// workflow dispatch). Exactly one is chosen at startup; implementations hold
/// their target configuration and shared HTTP client, and keep no per-call
/// state.
#[async_trait]
pub trait DeployTrigger: Send + Sync {
    /// Short name of the strategy, used in logs.
    fn strategy(&self) -> &'static str;

    /// Checks that every required configuration value is present.
    ///
    /// Must not perform I/O.
    fn validate(&self) -> Result<(), TriggerError>;

    /// Sends the outbound request(s) and interprets the response.
    ///
    /// Only called after [`DeployTrigger::validate`] returned `Ok`.
    async fn send(&self) -> Result<(), TriggerError>;
}

/// Runs one trigger attempt and maps the result onto a [`DeployOutcome`].
///
/// No retries. The diagnostic of a failed attempt is logged here and carried
/// on the outcome.
#[instrument(skip_all, fields(strategy = deploy.strategy()))]
pub async fn trigger(deploy: &dyn DeployTrigger) -> DeployOutcome {
    if let Err(err) = deploy.validate() {
        warn!(diagnostic = %err, "Deploy target misconfigured, not sending");
        return DeployOutcome::from_error(err);
    }

    match deploy.send().await {
        Ok(()) => {
            info!("Deploy triggered");
            DeployOutcome::triggered()
        }
        Err(err) => {
            error!(diagnostic = %err, "Deploy trigger failed");
            DeployOutcome::from_error(err)
        }
    }
}

#[cfg(test)]
#[path = "trigger_tests.rs"]
mod tests;
