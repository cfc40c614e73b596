//! Ghost deploy relay Railway adapter.
//!
//! Implements [`relay::DeployTrigger`] for Railway with two strategies:
//!
//! - [`RedeployTrigger`]: GraphQL lookup of the service's latest deployment in
//!   the environment, followed by a `deploymentRedeploy` mutation.
//! - [`ServiceDeployTrigger`]: a single REST call asking Railway to deploy the
//!   service directly.
//!
//! Exactly one of them is selected at startup by the `cli` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request bodies, GraphQL documents, and
//! response parsing live here. The [`relay`] crate sees only
//! [`relay::DeployTrigger`] and [`relay::TriggerError`].
//!
//! ## Transport
//!
//! Both triggers take a shared [`reqwest::Client`] built once by the caller and
//! apply their timeout per request. Every request carries
//! `Authorization: Bearer <token>`; the token is never logged.

mod client;
pub mod graphql;
pub mod rest;

pub use graphql::RedeployTrigger;
pub use rest::ServiceDeployTrigger;

/// Railway's public GraphQL endpoint.
pub const DEFAULT_GRAPHQL_URL: &str = "https://backboard.railway.app/graphql/v2";

/// Base of Railway's REST API.
pub const DEFAULT_API_URL: &str = "https://backboard.railway.app/api";
