//! Core relay domain for the Ghost deploy relay.
//!
//! A Ghost webhook arrives, the [`Dispatcher`] checks it against the
//! recognized event set, and a recognized event runs one attempt of the
//! configured [`DeployTrigger`]. Everything else in the workspace either feeds
//! notifications in (`listener`) or implements [`DeployTrigger`] (`railway`,
//! `github`).
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* a trigger must do; adapter crates define *how*.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ServiceId`, `DeploymentId`, `DeliveryId`, etc.) |
//! | [`types`] | `WebhookNotification`, `EventKind`, `DeployOutcome`, `Credential` |
//! | [`target`] | Railway and GitHub target configuration and validation |
//! | [`errors`] | `TriggerError` failure taxonomy |
//! | [`trigger`] | `DeployTrigger` port and the per-attempt state machine |
//! | [`dispatch`] | `Dispatcher`: event filtering |
//! | `http` | `reqwest` failure mapping (feature `http`) |

pub mod dispatch;
pub mod errors;
#[cfg(feature = "http")]
pub mod http;
pub mod identifiers;
pub mod target;
pub mod trigger;
pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use dispatch::Dispatcher;
pub use errors::TriggerError;
pub use identifiers::{
    DeliveryId, DeploymentId, EnvironmentId, GitRef, ProjectId, RepositoryName, RepositoryOwner,
    ServiceId, WorkflowFile,
};
pub use target::{DeployTarget, ValidatedDeployTarget, ValidatedWorkflowTarget, WorkflowTarget};
pub use trigger::{trigger, DeployTrigger};
pub use types::{Credential, DeployOutcome, EventKind, OutcomeKind, Timestamp, WebhookNotification};
