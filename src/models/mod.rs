//! Core data models for retrieved papers and export formats.

mod format;
mod paper;

pub use format::{ExportFormat, UnknownFormat};
pub use paper::{MissingField, PaperBuilder, PaperRecord, FIELD_LABELS};
