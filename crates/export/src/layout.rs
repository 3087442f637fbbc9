//! Page layout for exported summaries.
//!
//! Positions are in millimetres measured from the top-left corner of the
//! page, with `y` at the text baseline.

use tracing::warn;
use unicode_width::UnicodeWidthChar;
use vidbrief_core::format::decode_entities;
use vidbrief_core::{SectionSlot, SummaryDocument};

use crate::ExportError;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_X_MM: f32 = 10.0;
pub const MARGIN_TOP_MM: f32 = 20.0;
pub const MARGIN_BOTTOM_MM: f32 = 20.0;
pub const LINE_HEIGHT_MM: f32 = 10.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - MARGIN_X_MM * 2.0;

pub const TITLE_SIZE_PT: f32 = 16.0;
pub const HEADER_SIZE_PT: f32 = 14.0;
pub const BULLET_SIZE_PT: f32 = 12.0;

const TITLE_GAP_MM: f32 = 5.0;
const BULLET_INDENT_MM: f32 = 5.0;
const BULLET_PREFIX: &str = "• ";

const MM_PER_PT: f32 = 25.4 / 72.0;
// Average Helvetica advance, in ems.
const AVERAGE_ADVANCE_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub weight: FontWeight,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
    pub sections_laid_out: usize,
    pub sections_skipped: usize,
}

struct Cursor {
    pages: Vec<PageLayout>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            pages: vec![PageLayout::default()],
            y: MARGIN_TOP_MM,
        }
    }

    fn place(&mut self, text: String, x_mm: f32, size_pt: f32, weight: FontWeight) {
        if self.y + LINE_HEIGHT_MM > PAGE_HEIGHT_MM - MARGIN_BOTTOM_MM {
            self.pages.push(PageLayout::default());
            self.y = MARGIN_TOP_MM;
        }
        let y_mm = self.y;
        if let Some(page) = self.pages.last_mut() {
            page.lines.push(TextLine {
                text,
                x_mm,
                y_mm,
                size_pt,
                weight,
            });
        }
        self.y += LINE_HEIGHT_MM;
    }

    fn place_wrapped(&mut self, text: &str, x_mm: f32, size_pt: f32, weight: FontWeight) {
        let width = CONTENT_WIDTH_MM - (x_mm - MARGIN_X_MM);
        for line in wrap_text(text, width, size_pt) {
            self.place(line, x_mm, size_pt, weight);
        }
    }
}

/// Lay out a summary: optional title, then every valid section in order.
///
/// Sections that fail validation are skipped. A summary without a section
/// list cannot be exported.
pub fn layout_summary(
    summary: &SummaryDocument,
    title: Option<&str>,
) -> Result<DocumentLayout, ExportError> {
    let slots = summary.sections().ok_or(ExportError::MissingSections)?;
    let mut cursor = Cursor::new();

    if let Some(title) = title.filter(|t| !t.trim().is_empty()) {
        cursor.place_wrapped(
            &decode_entities(title),
            MARGIN_X_MM,
            TITLE_SIZE_PT,
            FontWeight::Bold,
        );
        cursor.y += TITLE_GAP_MM;
    }

    let mut laid_out = 0;
    let mut skipped = 0;
    for (index, slot) in slots.iter().enumerate() {
        let section = match slot {
            SectionSlot::Valid(section) => section,
            SectionSlot::Invalid { error, .. } => {
                warn!(section = index + 1, %error, "skipping invalid section in export");
                skipped += 1;
                continue;
            }
        };

        cursor.place_wrapped(
            &decode_entities(&section.header),
            MARGIN_X_MM,
            HEADER_SIZE_PT,
            FontWeight::Bold,
        );
        for bullet in &section.bullets {
            cursor.place_wrapped(
                &format!("{BULLET_PREFIX}{}", decode_entities(bullet)),
                MARGIN_X_MM + BULLET_INDENT_MM,
                BULLET_SIZE_PT,
                FontWeight::Regular,
            );
        }
        laid_out += 1;
    }

    Ok(DocumentLayout {
        pages: cursor.pages,
        sections_laid_out: laid_out,
        sections_skipped: skipped,
    })
}

fn char_width_mm(c: char, size_pt: f32) -> f32 {
    let cells = c.width().unwrap_or(0) as f32;
    cells * size_pt * MM_PER_PT * AVERAGE_ADVANCE_EM
}

fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().map(|c| char_width_mm(c, size_pt)).sum()
}

/// Greedy word wrap to `width_mm`. Words wider than a full line are split
/// at character boundaries.
pub fn wrap_text(text: &str, width_mm: f32, size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate_width = if current.is_empty() {
            text_width_mm(word, size_pt)
        } else {
            text_width_mm(&current, size_pt)
                + char_width_mm(' ', size_pt)
                + text_width_mm(word, size_pt)
        };
        if candidate_width <= width_mm {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            if !current.is_empty()
                && text_width_mm(&current, size_pt) + char_width_mm(c, size_pt) > width_mm
            {
                lines.push(std::mem::take(&mut current));
            }
            current.push(c);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
