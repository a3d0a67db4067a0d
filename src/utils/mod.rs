//! Utility modules supporting search and export.
//!
//! - [`HttpClient`]: HTTP client with a user agent and request timeout
//! - [`collapse_newlines`]: Fold multi-line feed text onto one line
//! - [`truncate_chars`]: Cut text at a character count without splitting a code point
//! - [`pad_label`]: Left-align a field label in a fixed-width column
//!
//! # HTTP Client
//!
//! ```rust,no_run
//! use scholarsift::utils::HttpClient;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::with_settings("scholarsift/0.1", Duration::from_secs(15))?;
//! let response = client.get("http://export.arxiv.org/api/query").send().await?;
//! # Ok(())
//! # }
//! ```

mod http;
mod text;

pub use http::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use text::{collapse_newlines, pad_label, truncate_chars};
