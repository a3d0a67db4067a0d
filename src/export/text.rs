//! Plain text export.

use std::path::Path;

use crate::export::{ExportError, REPORT_TITLE};
use crate::models::PaperRecord;
use crate::utils::pad_label;

/// Width of the label column
const LABEL_WIDTH: usize = 12;

/// Separator written after each paper
pub(crate) fn rule(width: usize) -> String {
    "—".repeat(width)
}

/// Render the text document
pub fn render(papers: &[PaperRecord], watermark: &str) -> String {
    let mut out = format!("{}\n\n", REPORT_TITLE);

    for (idx, paper) in papers.iter().enumerate() {
        out.push_str(&format!("Paper {}\n", idx + 1));
        for (label, value) in paper.fields() {
            out.push_str(&format!("{}: {}\n", pad_label(label, LABEL_WIDTH), value));
        }
        out.push_str(&rule(60));
        out.push_str("\n\n");
    }

    out.push_str(watermark);
    out
}

/// Write the text document to `path`
pub fn write(path: &Path, papers: &[PaperRecord], watermark: &str) -> Result<(), ExportError> {
    std::fs::write(path, render(papers, watermark))?;
    Ok(())
}
