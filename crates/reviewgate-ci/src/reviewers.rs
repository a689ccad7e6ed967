//! Required-reviewer configuration.

use crate::error::GateError;
use crate::Result;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Default name of the reviewer file, resolved against the working directory.
pub const REVIEWERS_FILE: &str = "REVIEWERS";

/// Account name that must approve before the gate passes.
///
/// Always trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReviewerIdentity(String);

impl ReviewerIdentity {
    /// Build an identity from raw text, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self> {
        let login = raw.trim();
        if login.is_empty() {
            return Err(GateError::NoReviewer);
        }
        Ok(ReviewerIdentity(login.to_string()))
    }

    /// Read the identity from a reviewer file.
    ///
    /// A missing file is reported the same way as an empty one. Other IO
    /// failures (permissions, invalid UTF-8) keep their own message.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Reviewer file {} not found", path.display());
                return Err(GateError::NoReviewer);
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&raw)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReviewerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
