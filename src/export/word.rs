//! Word (.docx) export.

use docx_rust::document::{BreakType, Paragraph, Run, TextSpace};
use docx_rust::formatting::{CharacterProperty, ParagraphProperty};
use docx_rust::styles::{Style, StyleType};
use docx_rust::Docx;
use std::path::Path;

use crate::export::{ExportError, REPORT_TITLE};
use crate::models::PaperRecord;
use crate::utils::pad_label;

/// Width of the label column in detail paragraphs
const LABEL_WIDTH: usize = 11;

/// Paragraph styles referenced by the report, with their bold font size in half-points
const REPORT_STYLES: [(&str, &str, isize); 2] = [("Title", "Title", 56), ("Heading1", "heading 1", 32)];

fn add_report_styles(docx: &mut Docx) {
    for (id, name, size) in REPORT_STYLES {
        docx.styles.push(
            Style::new(StyleType::Paragraph, id)
                .name(name)
                .character(CharacterProperty::default().bold(true).size(size)),
        );
    }
}

/// One run per paragraph; each `\n` becomes a line break and padding spaces are kept
fn paragraph(style: Option<&'static str>, text: &str) -> Paragraph<'static> {
    let mut run = Run::default();
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            run = run.push_break(None::<BreakType>);
        }
        if !line.is_empty() {
            run = run.push_text((line.to_string(), TextSpace::Preserve));
        }
    }

    let para = Paragraph::default();
    let para = match style {
        Some(style) => para.property(ParagraphProperty::default().style_id(style)),
        None => para,
    };
    para.push(run)
}

/// Paragraph texts in document order, with the style each one uses
pub fn paragraphs(papers: &[PaperRecord], watermark: &str) -> Vec<(Option<&'static str>, String)> {
    let mut out = vec![(Some("Title"), REPORT_TITLE.to_string())];

    for (idx, paper) in papers.iter().enumerate() {
        out.push((
            Some("Heading1"),
            format!("Paper {}: {}", idx + 1, paper.title),
        ));
        for (label, value) in paper.detail_fields() {
            out.push((None, format!("{}: {}", pad_label(label, LABEL_WIDTH), value)));
        }
    }

    out.push((None, watermark.to_string()));
    out
}

/// Write the Word document to `path`
pub fn write(path: &Path, papers: &[PaperRecord], watermark: &str) -> Result<(), ExportError> {
    let mut docx = Docx::default();
    add_report_styles(&mut docx);

    for (style, text) in paragraphs(papers, watermark) {
        docx.document.push(paragraph(style, &text));
    }

    docx.write_file(path)
        .map_err(|e| ExportError::Word(format!("{:?}", e)))?;
    Ok(())
}
