//! Export document formats.

use std::fmt;
use std::str::FromStr;

/// Document format for exported results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Plain UTF-8 text
    Text,
    /// Word document (.docx)
    Word,
    /// PDF document
    Pdf,
    /// Excel spreadsheet (.xlsx)
    Excel,
}

impl ExportFormat {
    /// All formats, in the order the web form lists them
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Word,
        ExportFormat::Pdf,
        ExportFormat::Excel,
    ];

    /// Returns the display name of the format
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Text => "Text",
            ExportFormat::Word => "Word",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Excel => "Excel",
        }
    }

    /// Returns the file extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Word => "docx",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Excel => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The format name matched none of the known formats
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown export format '{0}' (expected Text, Word, PDF or Excel)")]
pub struct UnknownFormat(pub String);

impl FromStr for ExportFormat {
    type Err = UnknownFormat;

    /// Accepts the display name or the file extension, case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ExportFormat::ALL
            .into_iter()
            .find(|format| {
                wanted.eq_ignore_ascii_case(format.name())
                    || wanted.eq_ignore_ascii_case(format.extension())
            })
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}
