//! Trigger context supplied by the hosting CI environment.
//!
//! On GitHub Actions the context comes from two places:
//! - `GITHUB_EVENT_PATH`: the webhook payload that triggered the workflow
//! - `GITHUB_REPOSITORY`: the `owner/name` of the repository

use crate::error::GateError;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, warn};

/// Repository identifier (owner + name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: &str, name: &str) -> Self {
        Repository {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }

    /// Parse an `owner/name` slug.
    pub fn parse(slug: &str) -> Result<Self> {
        match slug.trim().split_once('/') {
            Some((owner, name))
                if !owner.is_empty() && !name.is_empty() && !name.contains('/') =>
            {
                Ok(Repository::new(owner, name))
            }
            _ => Err(GateError::Context(format!(
                "Invalid repository '{}', expected 'owner/repo'",
                slug
            ))),
        }
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Read-only description of what triggered this invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerContext {
    /// Pull-request number, absent when the trigger was not a pull request.
    pub pull_number: Option<u64>,

    /// Repository the pull request belongs to.
    pub repository: Option<Repository>,
}

impl TriggerContext {
    pub fn new(pull_number: Option<u64>, repository: Option<Repository>) -> Self {
        TriggerContext {
            pull_number,
            repository,
        }
    }

    /// Load the context from an event payload file and a repository slug.
    ///
    /// A missing payload file is not an error: it means no pull request.
    /// A blank or malformed slug leaves the repository unknown so that a
    /// run without a pull request still succeeds; the gate rejects it later
    /// through [`TriggerContext::require_repository`].
    pub fn load(event_path: Option<&Path>, repository: Option<&str>) -> Result<Self> {
        let payload = match event_path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path)?;
                serde_json::from_str::<Value>(&raw).map_err(|e| {
                    GateError::Context(format!(
                        "Failed to parse event payload {}: {}",
                        path.display(),
                        e
                    ))
                })?
            }
            Some(path) => {
                warn!("Event payload {} does not exist", path.display());
                Value::Null
            }
            None => Value::Null,
        };

        let repository = match repository.map(str::trim) {
            Some(slug) if !slug.is_empty() => match Repository::parse(slug) {
                Ok(repo) => Some(repo),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            },
            _ => None,
        };

        let context = TriggerContext {
            pull_number: pull_number_from_payload(&payload),
            repository,
        };
        debug!(?context, "Resolved trigger context");
        Ok(context)
    }

    /// Load the context from the standard GitHub Actions variables.
    pub fn from_env() -> Result<Self> {
        let event_path = std::env::var_os("GITHUB_EVENT_PATH").map(std::path::PathBuf::from);
        let repository = std::env::var("GITHUB_REPOSITORY").ok();
        Self::load(event_path.as_deref(), repository.as_deref())
    }

    /// Repository identifier, required once the gate needs to query reviews.
    pub fn require_repository(&self) -> Result<&Repository> {
        self.repository.as_ref().ok_or_else(|| {
            GateError::Context(
                "Repository is unknown; set GITHUB_REPOSITORY to 'owner/repo'".to_string(),
            )
        })
    }
}

/// Extract `pull_request.number` from a webhook payload; `0` counts as absent.
fn pull_number_from_payload(payload: &Value) -> Option<u64> {
    payload["pull_request"]["number"]
        .as_u64()
        .filter(|number| *number != 0)
}
