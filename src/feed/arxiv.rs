//! arXiv feed implementation.

use async_trait::async_trait;
use feed_rs::parser;
use std::time::Duration;

use crate::config::FeedConfig;
use crate::feed::{FeedError, PaperFeed};
use crate::models::{MissingField, PaperBuilder, PaperRecord};
use crate::utils::{collapse_newlines, HttpClient, DEFAULT_USER_AGENT};

/// Base URL for arXiv API
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// arXiv paper feed
///
/// Issues one `GET` per search against the Atom query API and converts
/// each entry into a [`PaperRecord`].
#[derive(Debug, Clone)]
pub struct ArxivFeed {
    client: HttpClient,
    endpoint: String,
}

impl ArxivFeed {
    /// Create a new arXiv feed against the public endpoint
    pub fn new() -> Result<Self, FeedError> {
        Ok(Self::with_client(HttpClient::new()?, ARXIV_API_URL))
    }

    /// Create a feed from the `[feed]` configuration section
    pub fn from_config(config: &FeedConfig) -> Result<Self, FeedError> {
        if config.endpoint.trim().is_empty() {
            return Err(FeedError::InvalidRequest("feed endpoint is empty".to_string()));
        }
        let user_agent = config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let client =
            HttpClient::with_settings(user_agent, Duration::from_secs(config.timeout_secs))?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    /// Create with a custom HTTP client and endpoint (for testing)
    pub fn with_client(client: HttpClient, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Build the request URL for a keyword search
    ///
    /// Every parameter value is percent-encoded, so spaces, `&` and `#` in
    /// the query cannot break the URL.
    pub fn build_url(&self, query: &str, max_results: usize) -> String {
        format!(
            "{}?search_query={}&start=0&max_results={}",
            self.endpoint,
            urlencoding::encode(&format!("all:{}", query)),
            max_results
        )
    }

    /// Parse an Atom document into records, in feed order
    pub fn parse_feed(body: &[u8]) -> Result<Vec<PaperRecord>, FeedError> {
        let feed = parser::parse(body)
            .map_err(|e| FeedError::Parse(format!("Failed to parse Atom feed: {}", e)))?;

        feed.entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                Self::parse_entry(entry).map_err(|source| FeedError::MalformedEntry {
                    index: idx + 1,
                    source,
                })
            })
            .collect()
    }

    /// Parse one Atom entry into a PaperRecord
    fn parse_entry(entry: &feed_rs::model::Entry) -> Result<PaperRecord, MissingField> {
        let mut builder = PaperBuilder::new();

        if let Some(title) = &entry.title {
            builder = builder.title(title.content.as_str());
        }

        if !entry.authors.is_empty() {
            let authors = entry
                .authors
                .iter()
                .map(|a| a.name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            builder = builder.authors(authors);
        }

        if let Some(published) = entry.published {
            builder = builder.published(published.format("%Y-%m-%d").to_string());
        }

        if let Some(summary) = &entry.summary {
            builder = builder.abstract_text(collapse_newlines(&summary.content));
        }

        // arXiv lists the abstract page first and the PDF second
        let pdf_link = match entry.links.get(1) {
            Some(link) => link.href.clone(),
            None => entry.id.clone(),
        };

        builder.pdf_link(pdf_link).build()
    }
}

#[async_trait]
impl PaperFeed for ArxivFeed {
    fn id(&self) -> &str {
        "arxiv"
    }

    fn name(&self) -> &str {
        "arXiv"
    }

    async fn fetch(&self, query: &str, max_results: usize) -> Result<Vec<PaperRecord>, FeedError> {
        let url = self.build_url(query, max_results);
        tracing::debug!(url = %url, "Requesting arXiv feed");

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/atom+xml")
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedError::HttpStatus(response.status().as_u16()));
        }

        let bytes = response.bytes().await?;
        Self::parse_feed(bytes.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, links: &str) -> String {
        format!(
            r#"<entry>
                <id>{id}</id>
                <title>{title}</title>
                <summary>
  First line of the abstract
second line.
</summary>
                <published>2023-01-15T10:00:00Z</published>
                <author><name>Alice Author</name></author>
                <author><name>Bob Builder</name></author>
                {links}
            </entry>"#
        )
    }

    fn feed(entries: &[String]) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
    <title>arXiv Query Results</title>
    <id>http://arxiv.org/api/test</id>
    <updated>2023-01-16T00:00:00Z</updated>
    {}
</feed>"#,
            entries.join("\n")
        )
    }

    const TWO_LINKS: &str = r#"<link rel="alternate" type="text/html" href="http://arxiv.org/abs/2301.12345v1"/>
                <link title="pdf" rel="related" type="application/pdf" href="http://arxiv.org/pdf/2301.12345v1"/>"#;

    #[test]
    fn test_parse_feed_extracts_all_fields() {
        let body = feed(&[entry("http://arxiv.org/abs/2301.12345v1", "Test Paper Title", TWO_LINKS)]);
        let papers = ArxivFeed::parse_feed(body.as_bytes()).unwrap();

        assert_eq!(papers.len(), 1);
        let paper = &papers[0];
        assert_eq!(paper.title, "Test Paper Title");
        assert_eq!(paper.authors, "Alice Author, Bob Builder");
        assert_eq!(paper.published, "2023-01-15");
        assert_eq!(paper.pdf_link, "http://arxiv.org/pdf/2301.12345v1");
        assert_eq!(paper.r#abstract, "First line of the abstract second line.");
    }

    #[test]
    fn test_single_link_falls_back_to_entry_id() {
        let one_link =
            r#"<link rel="alternate" type="text/html" href="http://arxiv.org/abs/2301.99999v2"/>"#;
        let body = feed(&[entry("http://arxiv.org/abs/2301.99999v2", "One Link", one_link)]);
        let papers = ArxivFeed::parse_feed(body.as_bytes()).unwrap();

        assert_eq!(papers[0].pdf_link, "http://arxiv.org/abs/2301.99999v2");
    }

    #[test]
    fn test_parse_feed_keeps_feed_order() {
        let body = feed(&[
            entry("http://arxiv.org/abs/1", "First", TWO_LINKS),
            entry("http://arxiv.org/abs/2", "Second", TWO_LINKS),
            entry("http://arxiv.org/abs/3", "Third", TWO_LINKS),
        ]);
        let titles: Vec<String> = ArxivFeed::parse_feed(body.as_bytes())
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();

        assert_eq!(titles, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_empty_feed_has_no_records() {
        let papers = ArxivFeed::parse_feed(feed(&[]).as_bytes()).unwrap();
        assert!(papers.is_empty());
    }

    #[test]
    fn test_missing_summary_is_a_typed_error() {
        let body = feed(&[r#"<entry>
                <id>http://arxiv.org/abs/2301.00001v1</id>
                <title>No Abstract</title>
                <published>2023-01-15T10:00:00Z</published>
                <author><name>Alice Author</name></author>
            </entry>"#
            .to_string()]);

        match ArxivFeed::parse_feed(body.as_bytes()) {
            Err(FeedError::MalformedEntry { index, source }) => {
                assert_eq!(index, 1);
                assert_eq!(source, MissingField("summary"));
            }
            other => panic!("expected MalformedEntry, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_body_is_parse_error() {
        let result = ArxivFeed::parse_feed(b"<not valid xml");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_build_url_encodes_query() {
        let feed = ArxivFeed::with_client(HttpClient::new().unwrap(), ARXIV_API_URL);
        let url = feed.build_url("quantum computing & more", 3);

        assert_eq!(
            url,
            "http://export.arxiv.org/api/query?search_query=all%3Aquantum%20computing%20%26%20more&start=0&max_results=3"
        );
    }

    #[test]
    fn test_from_config_rejects_empty_endpoint() {
        let config = FeedConfig {
            endpoint: "  ".to_string(),
            ..FeedConfig::default()
        };
        assert!(matches!(
            ArxivFeed::from_config(&config),
            Err(FeedError::InvalidRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_with_mock_http() {
        let mut server = mockito::Server::new_async().await;
        let body = feed(&[entry("http://arxiv.org/abs/2301.12345v1", "Mocked", TWO_LINKS)]);
        let mock = server
            .mock("GET", "/api/query")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("search_query".into(), "all:graph neural".into()),
                mockito::Matcher::UrlEncoded("start".into(), "0".into()),
                mockito::Matcher::UrlEncoded("max_results".into(), "2".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/atom+xml")
            .with_body(body)
            .create_async()
            .await;

        let feed = ArxivFeed::with_client(
            HttpClient::new().unwrap(),
            format!("{}/api/query", server.url()),
        );
        let papers = feed.fetch("graph neural", 2).await.unwrap();

        mock.assert_async().await;
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].title, "Mocked");
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/query")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .create_async()
            .await;

        let feed = ArxivFeed::with_client(
            HttpClient::new().unwrap(),
            format!("{}/api/query", server.url()),
        );

        match feed.fetch("anything", 5).await {
            Err(FeedError::HttpStatus(503)) => {}
            other => panic!("expected HttpStatus(503), got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        // Accept connections and never answer
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client = HttpClient::with_settings("scholarsift-test", Duration::from_millis(200)).unwrap();
        let feed = ArxivFeed::with_client(client, format!("http://{}/api/query", addr));

        match feed.fetch("slow", 1).await {
            Err(FeedError::Timeout) => {}
            other => panic!("expected Timeout, got {:?}", other),
        }
    }
}
