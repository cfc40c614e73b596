//! Newtype domain identifiers.
//!
//! Every platform-assigned or configured identity is a distinct newtype wrapping
//! a `String`. This prevents accidentally passing, for example, a
//! [`ServiceId`] where an [`EnvironmentId`] is expected, even though both are
//! opaque Railway strings.
//!
//! String-backed identifiers can only be constructed from non-empty values, so
//! a validated target can never carry an empty id into an outbound request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Macro for String-wrapped newtypes.
// Generates: struct, new() returning Option<Self>, as_str(), Display.
// ---------------------------------------------------------------------------
macro_rules! string_id {
    (
        $(#[$attr:meta])*
        $name:ident
    ) => {
        $(#[$attr])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, returning `None` if the value is empty
            /// or only whitespace.
            pub fn new(value: impl Into<String>) -> Option<Self> {
                let v = value.into();
                if v.trim().is_empty() { None } else { Some(Self(v)) }
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Identifiers: UUID-backed (internally generated)
// ---------------------------------------------------------------------------

/// Identifies one received webhook delivery.
///
/// Generated fresh by the listener for every inbound request and attached to
/// the dispatch span so all log lines from a single relay can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryId(Uuid);

impl DeliveryId {
    /// Generates a new random delivery identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for DeliveryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Identifiers: Railway
// ---------------------------------------------------------------------------

string_id! {
    /// Identifies a Railway project.
    ProjectId
}

string_id! {
    /// Identifies a Railway service within a project.
    ServiceId
}

string_id! {
    /// Identifies a Railway environment (e.g. `production`) within a project.
    EnvironmentId
}

string_id! {
    /// Identifies one Railway deployment: a specific build/release instance of
    /// a service.
    ///
    /// Platform-assigned and opaque; only ever obtained from a lookup response.
    DeploymentId
}

// ---------------------------------------------------------------------------
// Identifiers: GitHub
// ---------------------------------------------------------------------------

string_id! {
    /// The owning user or organisation of a GitHub repository.
    RepositoryOwner
}

string_id! {
    /// The name of a GitHub repository (without the owner prefix).
    RepositoryName
}

string_id! {
    /// A workflow file name (e.g. `"deploy.yml"`) or numeric workflow id.
    WorkflowFile
}

string_id! {
    /// A Git reference (branch or tag name) a workflow is dispatched against.
    GitRef
}
