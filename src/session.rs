//! In-memory cache of the most recent search.
//!
//! A [`SessionHandle`] is created once per process (or per web server) and
//! passed to both the search pipeline and the exporters. Every successful
//! search replaces its contents wholesale; failed searches and exports never
//! touch it.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::models::PaperRecord;

/// Metadata about the search that filled the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryInfo {
    /// Query text as typed by the user
    pub query: String,

    /// Requested maximum number of results
    pub max_results: usize,

    /// Number of papers actually returned
    pub num_found: usize,

    /// Local completion time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

impl QueryInfo {
    /// Stamp a completed search with the current local time
    pub fn completed_now(query: impl Into<String>, max_results: usize, num_found: usize) -> Self {
        Self {
            query: query.into(),
            max_results,
            num_found,
            timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Results of the most recent successful search
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    papers: Vec<PaperRecord>,
    query_info: Option<QueryInfo>,
}

impl SearchSession {
    /// Papers in feed order
    pub fn papers(&self) -> &[PaperRecord] {
        &self.papers
    }

    /// Metadata of the search, if one has completed
    pub fn query_info(&self) -> Option<&QueryInfo> {
        self.query_info.as_ref()
    }

    /// Whether no search has produced results yet
    pub fn is_empty(&self) -> bool {
        self.papers.is_empty()
    }
}

/// Shared handle to a [`SearchSession`]
///
/// Cloning the handle shares the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<SearchSession>>,
}

impl SessionHandle {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached papers and query metadata in one step
    pub fn replace(&self, papers: Vec<PaperRecord>, query_info: QueryInfo) {
        let mut session = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *session = SearchSession {
            papers,
            query_info: Some(query_info),
        };
    }

    /// Copy of the cached session
    pub fn snapshot(&self) -> SearchSession {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Copy of the cached papers
    pub fn papers(&self) -> Vec<PaperRecord> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .papers
            .clone()
    }

    /// Copy of the cached query metadata
    pub fn query_info(&self) -> Option<QueryInfo> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .query_info
            .clone()
    }

    /// Number of cached papers
    pub fn len(&self) -> usize {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .papers
            .len()
    }

    /// Whether the session holds no papers
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
