//! Ghost deploy relay GitHub Actions adapter.
//!
//! Implements [`relay::DeployTrigger`] by asking GitHub to run a named
//! workflow against a branch (`workflow_dispatch`). Used when the site is
//! built and deployed by CI rather than by Railway directly.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** GitHub REST details (media type, API version header,
//! user agent, the `204 No Content` success convention) are handled here; the
//! [`relay`] crate never sees them.
//!
//! ## Credentials
//!
//! The workflow target carries its own GitHub token, separate from any Railway
//! credential. It needs `actions: write` on the target repository.

pub mod dispatch;

pub use dispatch::WorkflowDispatchTrigger;

/// GitHub's public REST API base.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
