//! The search pipeline: query the feed, fill the session, render a report.

use crate::feed::{FeedError, PaperFeed};
use crate::models::PaperRecord;
use crate::session::{QueryInfo, SessionHandle};
use crate::utils::pad_label;

/// Shown when the feed could not be reached
pub const CONNECTIVITY_FAILURE: &str =
    "❌ Could not reach arXiv. Check your network connection or try again later.";

/// Shown when the feed answered with something that is not a feed
pub const FEED_FAILURE: &str = "❌ arXiv returned a response that could not be read.";

/// Shown when an entry lacks a required field
pub const MALFORMED_ENTRY: &str = "❌ arXiv returned an incomplete paper entry.";

/// Shown when the search matched nothing
pub const NO_MATCHES: &str = "🔍 No matching papers found.";

const LABEL_WIDTH: usize = 11;

/// Result of one search request
#[derive(Debug)]
pub enum SearchOutcome {
    /// Papers were found and cached
    Found { report: String, count: usize },
    /// The feed returned no entries
    NoMatches,
    /// The request or the feed failed
    Failed(FeedError),
}

impl SearchOutcome {
    /// Text to show the user
    pub fn message(&self) -> &str {
        match self {
            SearchOutcome::Found { report, .. } => report.as_str(),
            SearchOutcome::NoMatches => NO_MATCHES,
            SearchOutcome::Failed(e) if e.is_connectivity() => CONNECTIVITY_FAILURE,
            SearchOutcome::Failed(FeedError::MalformedEntry { .. }) => MALFORMED_ENTRY,
            SearchOutcome::Failed(_) => FEED_FAILURE,
        }
    }

    /// Whether export controls should be offered
    pub fn reveal_export(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }
}

/// Render the numbered, labelled result listing
pub fn render_report(query: &str, papers: &[PaperRecord]) -> String {
    let mut out = format!("📚 ScholarSift results (query: {})\n\n", query);

    for (idx, paper) in papers.iter().enumerate() {
        out.push_str(&format!("📄 Paper {}\n", idx + 1));
        for (label, value) in paper.fields() {
            out.push_str(&format!("{}: {}\n", pad_label(label, LABEL_WIDTH), value));
        }
        out.push_str(&"—".repeat(60));
        out.push_str("\n\n");
    }

    out
}

/// Search `feed` and, on success, replace the session with the results.
///
/// The session is left untouched when the request fails or finds nothing.
pub async fn search_papers(
    feed: &dyn PaperFeed,
    session: &SessionHandle,
    query: &str,
    max_results: usize,
) -> SearchOutcome {
    tracing::info!(query = %query, max_results, feed = feed.id(), "Search requested");

    let papers = match feed.fetch(query, max_results).await {
        Ok(papers) => papers,
        Err(e) => {
            tracing::error!(error = %e, feed = feed.id(), "Feed request failed");
            return SearchOutcome::Failed(e);
        }
    };

    if papers.is_empty() {
        tracing::warn!(query = %query, "No matching papers");
        return SearchOutcome::NoMatches;
    }

    let report = render_report(query, &papers);
    let count = papers.len();
    session.replace(papers, QueryInfo::completed_now(query, max_results, count));

    tracing::info!(count, "Search completed");
    SearchOutcome::Found { report, count }
}
