//! In-memory fakes for the review source (testing only)
//!
//! Provides `MemoryReviewSource`, which serves a fixed snapshot of reviews
//! or a fixed fault without any network access.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::context::Repository;
use crate::error::GateError;
use crate::review::ReviewRecord;
use crate::source::ReviewSource;
use crate::Result;

/// In-memory review source backed by an immutable snapshot.
#[derive(Debug, Default)]
pub struct MemoryReviewSource {
    reviews: Vec<ReviewRecord>,
    fault: Option<String>,
    calls: Mutex<Vec<(Repository, u64)>>,
}

impl MemoryReviewSource {
    pub fn new(reviews: Vec<ReviewRecord>) -> Self {
        MemoryReviewSource {
            reviews,
            ..Default::default()
        }
    }

    /// A source whose every query fails with a connection fault carrying
    /// `message` as its text.
    pub fn failing(message: &str) -> Self {
        MemoryReviewSource {
            fault: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<(Repository, u64)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewSource for MemoryReviewSource {
    async fn list_reviews(
        &self,
        repo: &Repository,
        pull_number: u64,
    ) -> Result<Vec<ReviewRecord>> {
        self.calls.lock().unwrap().push((repo.clone(), pull_number));
        match &self.fault {
            Some(message) => Err(GateError::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                message.clone(),
            ))),
            None => Ok(self.reviews.clone()),
        }
    }
}
