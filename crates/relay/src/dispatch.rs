//! Event filter and dispatcher.
//!
//! [`Dispatcher::dispatch`] is the single entry point the listener calls for
//! every decoded webhook. Events outside the recognized set are acknowledged
//! and dropped; recognized events run exactly one trigger attempt.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{trigger, DeployOutcome, DeployTrigger, WebhookNotification};

/// Routes notifications to the configured [`DeployTrigger`].
///
/// Cheap to clone; the trigger is shared.
#[derive(Clone)]
pub struct Dispatcher {
    trigger: Arc<dyn DeployTrigger>,
}

impl Dispatcher {
    /// Creates a dispatcher around the process-wide trigger.
    pub fn new(trigger: Arc<dyn DeployTrigger>) -> Self {
        Self { trigger }
    }

    /// Name of the configured trigger strategy.
    pub fn strategy(&self) -> &'static str {
        self.trigger.strategy()
    }

    /// Filters one notification and, if it is actionable, triggers a deploy.
    ///
    /// Unrecognized events return [`DeployOutcome::ignored`] without touching
    /// the trigger. Recognized events return the trigger's outcome unchanged.
    #[instrument(
        skip_all,
        fields(
            delivery_id = %notification.delivery_id(),
            event = notification.event_type(),
        )
    )]
    pub async fn dispatch(&self, notification: &WebhookNotification) -> DeployOutcome {
        info!(
            received_at = %notification.received_at(),
            headers = ?notification.headers(),
            payload = %notification.payload(),
            "Received webhook notification"
        );

        let Some(kind) = notification.event_kind() else {
            info!("Event not in the recognized set, ignoring");
            return DeployOutcome::ignored();
        };

        debug!(?kind, "Recognized event, triggering deploy");
        trigger(self.trigger.as_ref()).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("strategy", &self.trigger.strategy())
            .finish()
    }
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
