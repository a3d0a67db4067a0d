//! Paper feed clients.
//!
//! This module defines the [`PaperFeed`] trait implemented by the arXiv
//! client. The search pipeline only talks to the trait, so tests (and any
//! future feed) can stand in for the network with [`MockFeed`].

mod arxiv;
pub mod mock;

pub use arxiv::{ArxivFeed, ARXIV_API_URL};
pub use mock::MockFeed;

use async_trait::async_trait;

use crate::models::{MissingField, PaperRecord};

/// The PaperFeed trait defines the interface for paper search backends.
#[async_trait]
pub trait PaperFeed: Send + Sync + std::fmt::Debug {
    /// Unique identifier for this feed (e.g. "arxiv")
    fn id(&self) -> &str;

    /// Human-readable name of this feed
    fn name(&self) -> &str;

    /// Fetch up to `max_results` papers matching `query`, in feed order
    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>, FeedError>;
}

/// Errors that can occur when querying a feed
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    /// Connection, DNS or TLS failure
    #[error("Network error: {0}")]
    Network(String),

    /// The request did not complete within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The endpoint answered with a non-success status
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),

    /// The response body is not a readable feed
    #[error("Parse error: {0}")]
    Parse(String),

    /// A feed entry lacks a field every paper must have
    #[error("Malformed entry #{index}: {source}")]
    MalformedEntry {
        index: usize,
        #[source]
        source: MissingField,
    },

    /// Invalid client configuration
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl FeedError {
    /// Whether the failure happened before a response was read
    pub fn is_connectivity(&self) -> bool {
        matches!(
            self,
            FeedError::Network(_) | FeedError::Timeout | FeedError::HttpStatus(_)
        )
    }
}

impl From<reqwest::Error> for FeedError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FeedError::Timeout
        } else if let Some(status) = err.status() {
            FeedError::HttpStatus(status.as_u16())
        } else {
            FeedError::Network(err.to_string())
        }
    }
}
