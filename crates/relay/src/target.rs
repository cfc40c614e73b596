//! Deploy target configuration.
//!
//! Targets are built once at startup from process configuration and shared
//! read-only for the lifetime of the process. They may hold empty values: a
//! missing setting is reported per request as a misconfiguration, not at
//! startup. [`DeployTarget::validate`] and [`WorkflowTarget::validate`] turn a
//! raw target into its validated form, whose identifiers are guaranteed
//! non-empty.

use crate::{
    Credential, EnvironmentId, GitRef, ProjectId, RepositoryName, RepositoryOwner, ServiceId,
    TriggerError, WorkflowFile,
};

// ---------------------------------------------------------------------------
// Railway
// ---------------------------------------------------------------------------

/// Railway deployment target as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployTarget {
    /// API endpoint. The GraphQL URL for the redeploy strategy, the REST base
    /// for the deploy strategy.
    pub base_url: String,
    pub project_id: String,
    pub service_id: String,
    pub environment_id: String,
    pub credential: Credential,
}

/// A [`DeployTarget`] whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDeployTarget {
    pub base_url: String,
    pub project_id: ProjectId,
    pub service_id: ServiceId,
    pub environment_id: EnvironmentId,
    pub credential: Credential,
}

impl DeployTarget {
    /// Checks every required field, reporting all empty ones at once.
    pub fn validate(&self) -> Result<ValidatedDeployTarget, TriggerError> {
        let mut missing = Vec::new();

        if self.base_url.trim().is_empty() {
            missing.push("base_url");
        }
        if self.credential.is_empty() {
            missing.push("credential");
        }
        let project_id = ProjectId::new(self.project_id.as_str());
        if project_id.is_none() {
            missing.push("project_id");
        }
        let service_id = ServiceId::new(self.service_id.as_str());
        if service_id.is_none() {
            missing.push("service_id");
        }
        let environment_id = EnvironmentId::new(self.environment_id.as_str());
        if environment_id.is_none() {
            missing.push("environment_id");
        }

        match (project_id, service_id, environment_id) {
            (Some(project_id), Some(service_id), Some(environment_id)) if missing.is_empty() => {
                Ok(ValidatedDeployTarget {
                    base_url: self.base_url.trim_end_matches('/').to_string(),
                    project_id,
                    service_id,
                    environment_id,
                    credential: self.credential.clone(),
                })
            }
            _ => Err(TriggerError::misconfigured(missing)),
        }
    }
}

// ---------------------------------------------------------------------------
// GitHub Actions
// ---------------------------------------------------------------------------

/// GitHub workflow-dispatch target as configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkflowTarget {
    /// REST API base, normally `https://api.github.com`.
    pub base_url: String,
    pub owner: String,
    pub repository: String,
    pub workflow_file: String,
    pub git_ref: String,
    /// Token scoped to GitHub; distinct from the Railway credential.
    pub credential: Credential,
}

/// A [`WorkflowTarget`] whose required fields are all present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedWorkflowTarget {
    pub base_url: String,
    pub owner: RepositoryOwner,
    pub repository: RepositoryName,
    pub workflow_file: WorkflowFile,
    pub git_ref: GitRef,
    pub credential: Credential,
}

impl WorkflowTarget {
    /// Checks every required field, reporting all empty ones at once.
    pub fn validate(&self) -> Result<ValidatedWorkflowTarget, TriggerError> {
        let mut missing = Vec::new();

        if self.base_url.trim().is_empty() {
            missing.push("base_url");
        }
        if self.credential.is_empty() {
            missing.push("credential");
        }
        let owner = RepositoryOwner::new(self.owner.as_str());
        if owner.is_none() {
            missing.push("owner");
        }
        let repository = RepositoryName::new(self.repository.as_str());
        if repository.is_none() {
            missing.push("repository");
        }
        let workflow_file = WorkflowFile::new(self.workflow_file.as_str());
        if workflow_file.is_none() {
            missing.push("workflow_file");
        }
        let git_ref = GitRef::new(self.git_ref.as_str());
        if git_ref.is_none() {
            missing.push("git_ref");
        }

        match (owner, repository, workflow_file, git_ref) {
            (Some(owner), Some(repository), Some(workflow_file), Some(git_ref))
                if missing.is_empty() =>
            {
                Ok(ValidatedWorkflowTarget {
                    base_url: self.base_url.trim_end_matches('/').to_string(),
                    owner,
                    repository,
                    workflow_file,
                    git_ref,
                    credential: self.credential.clone(),
                })
            }
            _ => Err(TriggerError::misconfigured(missing)),
        }
    }
}

#[cfg(test)]
#[path = "target_tests.rs"]
mod tests;
