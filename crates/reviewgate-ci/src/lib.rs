//! reviewgate CI - required-reviewer approval gate
//!
//! Blocks a pull request until a named reviewer has approved it:
//! - Resolves the pull request from the CI trigger context
//! - Reads the required reviewer from a `REVIEWERS` file
//! - Lists the pull request's reviews from GitHub
//! - Passes only if that reviewer submitted an `APPROVED` review

pub mod context;
pub mod error;
pub mod fakes;
pub mod gate;
pub mod report;
pub mod review;
pub mod reviewers;
pub mod source;
pub mod telemetry;

// Re-export key types
pub use context::{Repository, TriggerContext};
pub use error::{GateError, Result};
pub use gate::{evaluate, ApprovalGate, GateOutcome, GateVerdict};
pub use review::{ReviewRecord, ReviewState, ReviewUser};
pub use reviewers::{ReviewerIdentity, REVIEWERS_FILE};
pub use source::{GitHubConfig, GitHubReviewClient, ReviewSource, DEFAULT_API_URL};
pub use telemetry::init_tracing;
