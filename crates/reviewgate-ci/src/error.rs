//! Error types for reviewgate-ci

use thiserror::Error;

/// Result alias for gate operations.
pub type Result<T> = std::result::Result<T, GateError>;

/// Errors that terminate a gate run.
///
/// The `Display` text of each variant is the message reported to the
/// invoking environment. Wrapped faults are transparent: their own text is
/// the message and their source chain carries the underlying cause.
#[derive(Error, Debug)]
pub enum GateError {
    /// REVIEWERS file missing or blank
    #[error("No reviewer found in REVIEWERS file")]
    NoReviewer,

    /// Required reviewer has not approved
    #[error("Reviewer {reviewer} needs to approve the PR")]
    ApprovalMissing { reviewer: String },

    /// Trigger context could not be resolved
    #[error("{0}")]
    Context(String),

    /// Transport-level failure talking to the review service
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Review service answered with an error status
    #[error("{message}")]
    Api { status: u16, message: String },

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GateError {
    /// Whether this failure is a configuration problem rather than a
    /// missing approval or a remote fault.
    pub fn is_configuration(&self) -> bool {
        matches!(self, GateError::NoReviewer | GateError::Context(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_reported_verbatim() {
        assert_eq!(
            GateError::NoReviewer.to_string(),
            "No reviewer found in REVIEWERS file"
        );
        assert_eq!(
            GateError::ApprovalMissing {
                reviewer: "alice".to_string()
            }
            .to_string(),
            "Reviewer alice needs to approve the PR"
        );
    }

    #[test]
    fn test_io_error_is_not_repeated_in_chain() {
        use std::error::Error as _;

        let err = GateError::from(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "Permission denied",
        ));

        assert_eq!(err.to_string(), "Permission denied");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_configuration_errors_distinguishable() {
        assert!(GateError::NoReviewer.is_configuration());
        assert!(!GateError::ApprovalMissing {
            reviewer: "alice".to_string()
        }
        .is_configuration());
        assert!(!GateError::Api {
            status: 401,
            message: "Bad credentials".to_string()
        }
        .is_configuration());
    }
}
