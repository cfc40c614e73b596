//! Test double for [`DeployTrigger`], shared by this crate's tests and by
//! downstream crates through the `testing` feature.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::{DeployTrigger, TriggerError};

/// A [`DeployTrigger`] that returns canned results and counts calls.
#[derive(Debug)]
pub struct FakeTrigger {
    validation: Result<(), TriggerError>,
    response: Result<(), TriggerError>,
    validate_calls: AtomicUsize,
    send_calls: AtomicUsize,
}

impl FakeTrigger {
    /// A trigger whose sends always succeed.
    pub fn succeeding() -> Self {
        Self::with_results(Ok(()), Ok(()))
    }

    /// A trigger whose sends always fail with `error`.
    pub fn failing(error: TriggerError) -> Self {
        Self::with_results(Ok(()), Err(error))
    }

    /// A trigger whose validation fails with `error`.
    pub fn misconfigured(error: TriggerError) -> Self {
        Self::with_results(Err(error), Ok(()))
    }

    fn with_results(
        validation: Result<(), TriggerError>,
        response: Result<(), TriggerError>,
    ) -> Self {
        Self {
            validation,
            response,
            validate_calls: AtomicUsize::new(0),
            send_calls: AtomicUsize::new(0),
        }
    }

    /// Number of times [`DeployTrigger::validate`] ran.
    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    /// Number of times [`DeployTrigger::send`] ran.
    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DeployTrigger for FakeTrigger {
    fn strategy(&self) -> &'static str {
        "fake"
    }

    fn validate(&self) -> Result<(), TriggerError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        self.validation.clone()
    }

    async fn send(&self) -> Result<(), TriggerError> {
        self.send_calls.fetch_add(1, Ordering::SeqCst);
        self.response.clone()
    }
}
