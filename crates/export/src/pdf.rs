use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use crate::ExportError;
use crate::layout::{DocumentLayout, FontWeight, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};

fn pdf_error(err: impl std::fmt::Display) -> ExportError {
    ExportError::Pdf(err.to_string())
}

/// Write a laid-out document as PDF bytes using the built-in Helvetica faces.
pub fn render_pdf(layout: &DocumentLayout, document_title: &str) -> Result<Vec<u8>, ExportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document_title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Page 1",
    );
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    for (index, page) in layout.pages.iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", index + 1),
            )
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);
        for line in &page.lines {
            let font: &IndirectFontRef = match line.weight {
                FontWeight::Regular => &regular,
                FontWeight::Bold => &bold,
            };
            // PDF user space grows upward from the bottom edge.
            layer.use_text(
                line.text.as_str(),
                line.size_pt,
                Mm(line.x_mm),
                Mm(PAGE_HEIGHT_MM - line.y_mm),
                font,
            );
        }
    }

    doc.save_to_bytes().map_err(pdf_error)
}
