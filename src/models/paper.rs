//! Paper model representing one paper retrieved from the feed.

use serde::{Deserialize, Serialize};

/// Display labels of the five [`PaperRecord`] fields, in column order.
///
/// These are the keys used by the JSON output, the text export and the
/// spreadsheet header row.
pub const FIELD_LABELS: [&str; 5] = ["Title", "Authors", "Published", "PDF Link", "Abstract"];

/// A paper retrieved from the feed, normalized to five text fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    /// Paper title, verbatim from the feed
    #[serde(rename = "Title")]
    pub title: String,

    /// Author names (comma-separated)
    #[serde(rename = "Authors")]
    pub authors: String,

    /// Publication date (YYYY-MM-DD)
    #[serde(rename = "Published")]
    pub published: String,

    /// Direct PDF link, or the entry identifier when the feed has none
    #[serde(rename = "PDF Link")]
    pub pdf_link: String,

    /// Abstract on a single line
    #[serde(rename = "Abstract")]
    pub r#abstract: String,
}

impl PaperRecord {
    /// Create a record from its five fields
    pub fn new(
        title: impl Into<String>,
        authors: impl Into<String>,
        published: impl Into<String>,
        pdf_link: impl Into<String>,
        abstract_text: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            authors: authors.into(),
            published: published.into(),
            pdf_link: pdf_link.into(),
            r#abstract: abstract_text.into(),
        }
    }

    /// Label/value pairs in [`FIELD_LABELS`] order
    pub fn fields(&self) -> [(&'static str, &str); 5] {
        [
            (FIELD_LABELS[0], self.title.as_str()),
            (FIELD_LABELS[1], self.authors.as_str()),
            (FIELD_LABELS[2], self.published.as_str()),
            (FIELD_LABELS[3], self.pdf_link.as_str()),
            (FIELD_LABELS[4], self.r#abstract.as_str()),
        ]
    }

    /// The fields shown under a paper's heading (everything but the title)
    pub fn detail_fields(&self) -> [(&'static str, &str); 4] {
        let [_, authors, published, pdf_link, abstract_text] = self.fields();
        [authors, published, pdf_link, abstract_text]
    }
}

/// A required field was absent from a feed entry
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("missing field: {0}")]
pub struct MissingField(pub &'static str);

/// Builder for constructing PaperRecord objects
///
/// Every field is required; [`PaperBuilder::build`] reports the first one
/// that was never set.
#[derive(Debug, Clone, Default)]
pub struct PaperBuilder {
    title: Option<String>,
    authors: Option<String>,
    published: Option<String>,
    pdf_link: Option<String>,
    abstract_text: Option<String>,
}

impl PaperBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set authors
    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    /// Set publication date
    pub fn published(mut self, date: impl Into<String>) -> Self {
        self.published = Some(date.into());
        self
    }

    /// Set PDF link
    pub fn pdf_link(mut self, url: impl Into<String>) -> Self {
        self.pdf_link = Some(url.into());
        self
    }

    /// Set abstract
    pub fn abstract_text(mut self, abstract_text: impl Into<String>) -> Self {
        self.abstract_text = Some(abstract_text.into());
        self
    }

    /// Build the PaperRecord
    pub fn build(self) -> Result<PaperRecord, MissingField> {
        Ok(PaperRecord {
            title: self.title.ok_or(MissingField("title"))?,
            authors: self.authors.ok_or(MissingField("authors"))?,
            published: self.published.ok_or(MissingField("published"))?,
            pdf_link: self.pdf_link.ok_or(MissingField("link"))?,
            r#abstract: self.abstract_text.ok_or(MissingField("summary"))?,
        })
    }
}
