//! Document export of the cached search results.
//!
//! [`ExportWriter`] owns the output location and writes one file per call,
//! always to `<output_dir>/<base_name>.<ext>`, so a second export of the same
//! format replaces the first. After each successful write a one-record JSON
//! log is (re)written next to the working directory.
//!
//! ```rust,no_run
//! use scholarsift::export::ExportWriter;
//! use scholarsift::models::ExportFormat;
//! # fn example(papers: Vec<scholarsift::PaperRecord>) -> Result<(), scholarsift::ExportError> {
//! let writer = ExportWriter::new("outputs");
//! let path = writer.write(&papers, ExportFormat::Pdf)?;
//! println!("written to {}", path.display());
//! # Ok(())
//! # }
//! ```

mod excel;
mod log;
mod pdf;
mod text;
mod word;

pub use log::{ExportLogEntry, DEFAULT_LOG_FILE};
pub use pdf::{layout as pdf_layout, PlacedLine, MAX_LINE_CHARS};

use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::models::{ExportFormat, PaperRecord};
use crate::session::SessionHandle;

/// Heading written at the top of every exported document
pub const REPORT_TITLE: &str = "ScholarSift Paper Export Report";

/// Trailing line appended to text, Word and PDF exports
pub const DEFAULT_WATERMARK: &str = "\n— Exported by ScholarSift literature assistant —\n";

/// Default export file name, without extension
pub const DEFAULT_BASE_NAME: &str = "scholarsift_export";

/// Errors that can occur while exporting
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Nothing has been searched yet, or the last search found nothing
    #[error("No search results to export")]
    EmptySession,

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Word document could not be assembled or saved
    #[error("Word export failed: {0}")]
    Word(String),

    /// PDF document could not be assembled or saved
    #[error("PDF export failed: {0}")]
    Pdf(#[from] lopdf::Error),

    /// Spreadsheet could not be assembled or saved
    #[error("Excel export failed: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    /// Export log could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Writes cached results to documents in a fixed output location
#[derive(Debug, Clone)]
pub struct ExportWriter {
    output_dir: PathBuf,
    base_name: String,
    log_file: PathBuf,
    watermark: String,
}

impl ExportWriter {
    /// Create a writer for `output_dir` with the default file names
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            base_name: DEFAULT_BASE_NAME.to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            watermark: DEFAULT_WATERMARK.to_string(),
        }
    }

    /// Create a writer from the `[export]` configuration section
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            base_name: config.base_name.clone(),
            log_file: config.log_file.clone(),
            watermark: config.watermark.clone(),
        }
    }

    /// Set the export file name (without extension)
    pub fn with_base_name(mut self, base_name: impl Into<String>) -> Self {
        self.base_name = base_name.into();
        self
    }

    /// Set the JSON export log path
    pub fn with_log_file(mut self, log_file: impl Into<PathBuf>) -> Self {
        self.log_file = log_file.into();
        self
    }

    /// Directory receiving exported documents
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the JSON export log
    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    /// Where an export of `format` is written
    pub fn output_path(&self, format: ExportFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.base_name, format.extension()))
    }

    /// Write `papers` as `format`, then record the export in the log file.
    ///
    /// Nothing is created on disk when `papers` is empty. A failure part-way
    /// through leaves whatever was already written in place.
    pub fn write(&self, papers: &[PaperRecord], format: ExportFormat) -> Result<PathBuf, ExportError> {
        if papers.is_empty() {
            return Err(ExportError::EmptySession);
        }

        std::fs::create_dir_all(&self.output_dir)?;
        let path = self.output_path(format);

        match format {
            ExportFormat::Text => text::write(&path, papers, &self.watermark)?,
            ExportFormat::Word => word::write(&path, papers, &self.watermark)?,
            ExportFormat::Pdf => pdf::write(&path, papers, &self.watermark)?,
            ExportFormat::Excel => excel::write(&path, papers)?,
        }

        ExportLogEntry::export(format, papers.len()).write(&self.log_file)?;
        Ok(path)
    }
}

/// Export whatever the session currently holds.
///
/// Returns the written file, or `None` when the session is empty or the
/// export failed; both cases are logged.
pub fn export_results(
    writer: &ExportWriter,
    session: &SessionHandle,
    format: ExportFormat,
) -> Option<PathBuf> {
    tracing::info!(format = %format, "Export requested");

    let papers = session.papers();
    match writer.write(&papers, format) {
        Ok(path) => {
            tracing::info!(path = %path.display(), count = papers.len(), "Export succeeded");
            Some(path)
        }
        Err(ExportError::EmptySession) => {
            tracing::warn!("Export skipped: no cached search results");
            None
        }
        Err(e) => {
            tracing::error!(format = %format, error = %e, "Export failed");
            None
        }
    }
}
