//! Mock feed for testing purposes.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::feed::{FeedError, PaperFeed};
use crate::models::PaperRecord;

/// What the mock answers with on the next fetch
#[derive(Debug, Clone)]
enum MockResponse {
    Papers(Vec<PaperRecord>),
    Timeout,
    Status(u16),
}

/// A mock feed that returns predefined responses and records the requests it saw.
#[derive(Debug, Default)]
pub struct MockFeed {
    response: Mutex<Option<MockResponse>>,
    requests: Mutex<Vec<(String, usize)>>,
}

impl MockFeed {
    /// Create a new mock feed that finds nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock feed that returns `papers` on every fetch
    pub fn with_papers(papers: Vec<PaperRecord>) -> Self {
        let feed = Self::new();
        feed.set_papers(papers);
        feed
    }

    /// Set the papers to return
    pub fn set_papers(&self, papers: Vec<PaperRecord>) {
        self.set(MockResponse::Papers(papers));
    }

    /// Make every fetch fail with a timeout
    pub fn fail_with_timeout(&self) {
        self.set(MockResponse::Timeout);
    }

    /// Make every fetch fail with the given HTTP status
    pub fn fail_with_status(&self, status: u16) {
        self.set(MockResponse::Status(status));
    }

    /// Clear the configured response
    pub fn clear_response(&self) {
        let mut guard = self.response.lock().unwrap();
        *guard = None;
    }

    /// Requests received so far as `(query, max_results)`
    pub fn requests(&self) -> Vec<(String, usize)> {
        self.requests.lock().unwrap().clone()
    }

    fn set(&self, response: MockResponse) {
        let mut guard = self.response.lock().unwrap();
        *guard = Some(response);
    }
}

#[async_trait]
impl PaperFeed for MockFeed {
    fn id(&self) -> &str {
        "mock"
    }

    fn name(&self) -> &str {
        "Mock Feed"
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>, FeedError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), max_results));

        let guard = self.response.lock().unwrap();
        match &*guard {
            Some(MockResponse::Papers(papers)) => Ok(papers.iter().take(max_results).cloned().collect()),
            Some(MockResponse::Timeout) => Err(FeedError::Timeout),
            Some(MockResponse::Status(status)) => Err(FeedError::HttpStatus(*status)),
            None => Ok(Vec::new()),
        }
    }
}

/// Helper function to create a mock paper for testing.
pub fn make_paper(index: usize) -> PaperRecord {
    PaperRecord::new(
        format!("Paper number {}", index),
        format!("Author {}, Coauthor {}", index, index),
        format!("2024-01-{:02}", index % 28 + 1),
        format!("http://arxiv.org/pdf/2401.{:05}v1", index),
        format!("Abstract of paper {} describing its contribution.", index),
    )
}
