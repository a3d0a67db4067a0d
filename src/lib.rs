//! # ScholarSift
//!
//! Search the arXiv paper feed for a keyword, keep the latest results in memory,
//! and export them as a text, Word, PDF or Excel document.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (PaperRecord, ExportFormat)
//! - [`feed`]: Paper feed clients behind the [`PaperFeed`] trait
//! - [`session`]: The in-memory cache of the most recent search
//! - [`search`]: The search pipeline that fills the session and renders a report
//! - [`export`]: Document writers for the four export formats
//! - [`web`]: The HTML form served by `scholarsift serve`
//! - [`ui`]: Terminal output for the CLI
//! - [`utils`]: HTTP client and text helpers
//! - [`config`]: Configuration management

pub mod config;
pub mod export;
pub mod feed;
pub mod models;
pub mod search;
pub mod session;
pub mod ui;
pub mod utils;
pub mod web;

// Re-export commonly used types
pub use export::{export_results, ExportError, ExportWriter};
pub use feed::{ArxivFeed, FeedError, PaperFeed};
pub use models::{ExportFormat, PaperRecord};
pub use search::{search_papers, SearchOutcome};
pub use session::{QueryInfo, SessionHandle};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name written into export logs and document titles
pub const TOOL_NAME: &str = "ScholarSift";
