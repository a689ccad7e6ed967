//! Review sources.
//!
//! [`ReviewSource`] is the single seam between the gate and the remote
//! review service. [`GitHubReviewClient`] talks to the GitHub REST API;
//! tests use [`crate::fakes::MemoryReviewSource`].

use crate::context::Repository;
use crate::error::GateError;
use crate::review::ReviewRecord;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default GitHub REST endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Largest page the reviews endpoint serves in one response.
const PER_PAGE: u32 = 100;

/// Lists the reviews submitted on a pull request.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn list_reviews(&self, repo: &Repository, pull_number: u64)
        -> Result<Vec<ReviewRecord>>;
}

/// GitHub API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,
    /// Token for authenticated requests (optional for public repositories)
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: std::env::var("GITHUB_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            token: std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

impl GitHubConfig {
    /// Create a config from `GITHUB_API_URL` and `GITHUB_TOKEN`
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Create config for a specific API endpoint
    pub fn new(api_url: &str) -> Self {
        GitHubConfig {
            api_url: api_url.to_string(),
            token: None,
        }
    }

    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

/// Error body returned by the GitHub API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// GitHub REST client for pull-request reviews
pub struct GitHubReviewClient {
    config: GitHubConfig,
    http_client: reqwest::Client,
}

impl GitHubReviewClient {
    /// Create a new client
    pub fn new(config: GitHubConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("reviewgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GitHubReviewClient {
            config,
            http_client,
        })
    }

    /// Create client from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(GitHubConfig::from_env())
    }

    fn reviews_url(&self, repo: &Repository, pull_number: u64) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}/reviews",
            self.config.api_url.trim_end_matches('/'),
            repo.owner,
            repo.name,
            pull_number
        )
    }
}

#[async_trait]
impl ReviewSource for GitHubReviewClient {
    async fn list_reviews(
        &self,
        repo: &Repository,
        pull_number: u64,
    ) -> Result<Vec<ReviewRecord>> {
        let url = self.reviews_url(repo, pull_number);
        debug!("GET {}", url);

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("per_page", PER_PAGE)])
            .header(reqwest::header::ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(GateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let reviews: Vec<ReviewRecord> = response.json().await?;
        info!(
            "Fetched {} review(s) for {}#{}",
            reviews.len(),
            repo,
            pull_number
        );
        Ok(reviews)
    }
}
