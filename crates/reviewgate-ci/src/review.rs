//! Pull-request review records as returned by the review service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Review verdict.
///
/// States the service adds later are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Commented,
    Dismissed,
    Pending,
    Other(String),
}

impl ReviewState {
    pub fn as_str(&self) -> &str {
        match self {
            ReviewState::Approved => "APPROVED",
            ReviewState::ChangesRequested => "CHANGES_REQUESTED",
            ReviewState::Commented => "COMMENTED",
            ReviewState::Dismissed => "DISMISSED",
            ReviewState::Pending => "PENDING",
            ReviewState::Other(raw) => raw,
        }
    }
}

impl From<String> for ReviewState {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "APPROVED" => ReviewState::Approved,
            "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
            "COMMENTED" => ReviewState::Commented,
            "DISMISSED" => ReviewState::Dismissed,
            "PENDING" => ReviewState::Pending,
            _ => ReviewState::Other(raw),
        }
    }
}

impl From<ReviewState> for String {
    fn from(state: ReviewState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Review author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewUser {
    pub login: String,
}

/// One submitted review on a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Author; `null` for deleted accounts.
    #[serde(default)]
    pub user: Option<ReviewUser>,

    pub state: ReviewState,

    /// Absent for pending reviews.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ReviewRecord {
    pub fn new(login: &str, state: ReviewState) -> Self {
        ReviewRecord {
            user: Some(ReviewUser {
                login: login.to_string(),
            }),
            state,
            submitted_at: None,
        }
    }

    /// Author login, if the author is known.
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }

    /// Whether this record is an approval by `login`.
    pub fn is_approval_by(&self, login: &str) -> bool {
        self.state == ReviewState::Approved && self.author() == Some(login)
    }
}
