//! Required-reviewer approval gate.

use crate::context::TriggerContext;
use crate::error::GateError;
use crate::review::ReviewRecord;
use crate::reviewers::ReviewerIdentity;
use crate::source::ReviewSource;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Gate evaluation verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateVerdict {
    /// Whether the required reviewer approved.
    pub passed: bool,

    /// Number of approvals by the required reviewer.
    pub approvals: usize,

    /// Summary message.
    pub message: String,
}

/// Successful end states of a gate run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// The trigger was not a pull request; nothing was checked.
    Skipped,

    /// The required reviewer approved the pull request.
    Approved,
}

/// Decide whether `reviewer` approved.
///
/// Gate rule: at least one record authored by `reviewer` with state
/// `APPROVED`. Records are treated as a set; a later non-approval by the
/// same reviewer does not revoke an earlier approval.
pub fn evaluate(reviews: &[ReviewRecord], reviewer: &ReviewerIdentity) -> GateVerdict {
    let mut approvals = 0;

    for review in reviews {
        if review.is_approval_by(reviewer.as_str()) {
            approvals += 1;
        }
    }

    let passed = approvals > 0;
    let message = if passed {
        format!("Reviewer {} approved the PR", reviewer)
    } else {
        format!("Reviewer {} needs to approve the PR", reviewer)
    };

    GateVerdict {
        passed,
        approvals,
        message,
    }
}

/// Approval gate over a review source.
pub struct ApprovalGate<S> {
    source: S,
}

impl<S: ReviewSource> ApprovalGate<S> {
    pub fn new(source: S) -> Self {
        ApprovalGate { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run the gate end to end.
    ///
    /// Steps: resolve the pull request (absent → [`GateOutcome::Skipped`]),
    /// load the reviewer, fetch reviews, evaluate. Every failure comes back
    /// as a [`GateError`] whose `Display` is the message to report.
    pub async fn run(
        &self,
        context: &TriggerContext,
        reviewers_path: &Path,
    ) -> Result<GateOutcome> {
        let Some(pull_number) = context.pull_number else {
            info!("Not triggered by a pull request, skipping approval check");
            return Ok(GateOutcome::Skipped);
        };

        let reviewer = ReviewerIdentity::load(reviewers_path)?;
        let repo = context.require_repository()?;
        info!(
            "Checking approval from {} on {}#{}",
            reviewer, repo, pull_number
        );

        let reviews = self.source.list_reviews(repo, pull_number).await?;
        for review in &reviews {
            info!(
                "{}: {}",
                review.author().unwrap_or("<unknown>"),
                review.state
            );
        }

        let verdict = evaluate(&reviews, &reviewer);
        if !verdict.passed {
            return Err(GateError::ApprovalMissing {
                reviewer: reviewer.to_string(),
            });
        }

        info!("{}", verdict.message);
        Ok(GateOutcome::Approved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::ReviewState;

    fn alice() -> ReviewerIdentity {
        ReviewerIdentity::parse("alice").unwrap()
    }

    #[test]
    fn test_empty_reviews_fail() {
        let verdict = evaluate(&[], &alice());
        assert!(!verdict.passed);
        assert_eq!(verdict.approvals, 0);
    }

    #[test]
    fn test_matching_approval_passes() {
        let reviews = vec![ReviewRecord::new("alice", ReviewState::Approved)];

        let verdict = evaluate(&reviews, &alice());
        assert!(verdict.passed);
        assert_eq!(verdict.approvals, 1);
    }

    #[test]
    fn test_other_reviewer_approval_fails() {
        let reviews = vec![ReviewRecord::new("bob", ReviewState::Approved)];

        let verdict = evaluate(&reviews, &alice());
        assert!(!verdict.passed);
        assert_eq!(verdict.message, "Reviewer alice needs to approve the PR");
    }

    #[test]
    fn test_comment_then_approval_passes() {
        let reviews = vec![
            ReviewRecord::new("alice", ReviewState::Commented),
            ReviewRecord::new("alice", ReviewState::Approved),
        ];

        assert!(evaluate(&reviews, &alice()).passed);
    }

    #[test]
    fn test_later_changes_requested_does_not_revoke() {
        let reviews = vec![
            ReviewRecord::new("alice", ReviewState::Approved),
            ReviewRecord::new("alice", ReviewState::ChangesRequested),
        ];

        assert!(evaluate(&reviews, &alice()).passed);
    }

    #[test]
    fn test_all_records_scanned() {
        let reviews = vec![
            ReviewRecord::new("alice", ReviewState::Approved),
            ReviewRecord::new("bob", ReviewState::Approved),
            ReviewRecord::new("alice", ReviewState::Approved),
        ];

        assert_eq!(evaluate(&reviews, &alice()).approvals, 2);
    }

    #[test]
    fn test_unknown_author_never_matches() {
        let reviews = vec![ReviewRecord {
            user: None,
            state: ReviewState::Approved,
            submitted_at: None,
        }];

        assert!(!evaluate(&reviews, &alice()).passed);
    }
}
