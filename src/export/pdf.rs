//! PDF export.
//!
//! Layout and rendering are split: [`layout`] places every line on US-Letter
//! pages, and the placed lines are then turned into a `lopdf` document using
//! the standard Helvetica font.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::path::Path;

use crate::export::text::rule;
use crate::export::{ExportError, REPORT_TITLE};
use crate::models::PaperRecord;
use crate::utils::{pad_label, truncate_chars};

/// US-Letter width in points
pub const PAGE_WIDTH: f32 = 612.0;
/// US-Letter height in points
pub const PAGE_HEIGHT: f32 = 792.0;
/// Left, top and bottom margin in points
pub const MARGIN: f32 = 50.0;
/// Lines longer than this many characters are cut before drawing
pub const MAX_LINE_CHARS: usize = 100;

const LABEL_WIDTH: usize = 11;
const BODY_SIZE: f32 = 10.0;
const BODY_SPACING: f32 = 14.0;

/// One line of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub text: String,
}

/// Cursor-based page builder
#[derive(Debug)]
struct Canvas {
    pages: Vec<Vec<PlacedLine>>,
    current: Vec<PlacedLine>,
    y: f32,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Draw each line of `text`, starting a new page when the cursor has
    /// dropped below the bottom margin
    fn draw(&mut self, text: &str, font_size: f32, spacing: f32) {
        for line in text.split('\n') {
            if self.y < MARGIN {
                self.show_page();
            }
            self.current.push(PlacedLine {
                x: MARGIN,
                y: self.y,
                font_size,
                text: truncate_chars(line, MAX_LINE_CHARS).to_string(),
            });
            self.y -= spacing;
        }
    }

    fn skip(&mut self, gap: f32) {
        self.y -= gap;
    }

    fn show_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn finish(mut self) -> Vec<Vec<PlacedLine>> {
        if !self.current.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        self.pages
    }
}

/// Place the report on pages
pub fn layout(papers: &[PaperRecord], watermark: &str) -> Vec<Vec<PlacedLine>> {
    let mut canvas = Canvas::new();

    canvas.draw(REPORT_TITLE, 14.0, 20.0);
    canvas.skip(10.0);

    for (idx, paper) in papers.iter().enumerate() {
        canvas.draw(&format!("Paper {}: {}", idx + 1, paper.title), 12.0, BODY_SPACING);
        for (label, value) in paper.detail_fields() {
            canvas.draw(
                &format!("{}: {}", pad_label(label, LABEL_WIDTH), value),
                BODY_SIZE,
                BODY_SPACING,
            );
        }
        canvas.draw(&rule(70), BODY_SIZE, BODY_SPACING);
        canvas.skip(10.0);
    }

    canvas.draw(watermark, BODY_SIZE, BODY_SPACING);
    canvas.finish()
}

/// Encode text for a standard font with WinAnsiEncoding
///
/// Characters the encoding cannot represent become `?`.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

fn page_content(lines: &[PlacedLine]) -> Result<Vec<u8>, lopdf::Error> {
    let mut operations = Vec::with_capacity(lines.len() * 5);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec!["F1".into(), line.font_size.into()]));
        operations.push(Operation::new("Td", vec![line.x.into(), line.y.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }.encode()
}

/// Build the PDF document for already placed pages
fn render(pages: &[Vec<PlacedLine>]) -> Result<Document, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages.len());
    for lines in pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, page_content(lines)?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        page_ids.push(page_id);
    }

    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => page_ids.iter().map(|id| Object::from(*id)).collect::<Vec<Object>>(),
        "Count" => page_ids.len() as i64,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    Ok(doc)
}

/// Write the PDF document to `path`
pub fn write(path: &Path, papers: &[PaperRecord], watermark: &str) -> Result<(), ExportError> {
    let mut doc = render(&layout(papers, watermark))?;
    doc.save(path)?;
    Ok(())
}
