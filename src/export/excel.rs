//! Excel (.xlsx) export.

use rust_xlsxwriter::{Format, FormatBorder, Workbook};
use std::path::Path;

use crate::export::ExportError;
use crate::models::{PaperRecord, FIELD_LABELS};

/// Write one header row and one row per paper to `path`
pub fn write(path: &Path, papers: &[PaperRecord]) -> Result<(), ExportError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold().set_border(FormatBorder::Thin);
    let worksheet = workbook.add_worksheet();

    for (col, label) in FIELD_LABELS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *label, &header)?;
    }

    for (idx, paper) in papers.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, (_, value)) in paper.fields().iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}
