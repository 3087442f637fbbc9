//! PDF export of summaries: a pure page layout pass and a printpdf writer.

pub mod layout;
pub mod pdf;

use std::path::{Path, PathBuf};

use tracing::info;
use vidbrief_core::SummaryDocument;
use vidbrief_core::format::decode_entities;

pub use layout::{DocumentLayout, FontWeight, PageLayout, TextLine, layout_summary};
pub use pdf::render_pdf;

/// File name used when the summary has no title.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "summary.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("invalid summary data: sections are missing or not a list")]
    MissingSections,
    #[error("pdf generation failed: {0}")]
    Pdf(String),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// `"{title}.pdf"` with path separators replaced, or `summary.pdf`.
pub fn export_file_name(title: Option<&str>) -> String {
    let Some(title) = title.map(|t| decode_entities(t.trim())).filter(|t| !t.is_empty())
    else {
        return DEFAULT_EXPORT_FILE_NAME.to_string();
    };
    let safe: String = title
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .collect();
    format!("{safe}.pdf")
}

/// Lay out, render and write a summary into `directory`. Returns the path
/// of the written file.
pub fn export_pdf(
    summary: &SummaryDocument,
    title: Option<&str>,
    directory: &Path,
) -> Result<PathBuf, ExportError> {
    let layout = layout_summary(summary, title)?;
    let bytes = render_pdf(&layout, title.unwrap_or("Summary"))?;

    std::fs::create_dir_all(directory)?;
    let path = directory.join(export_file_name(title));
    std::fs::write(&path, bytes)?;
    info!(
        path = %path.display(),
        pages = layout.pages.len(),
        sections = layout.sections_laid_out,
        "exported summary"
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_from_title() {
        assert_eq!(export_file_name(Some("My Video")), "My Video.pdf");
        assert_eq!(export_file_name(Some("Don&#39;t Panic")), "Don't Panic.pdf");
        assert_eq!(export_file_name(Some("AC/DC: Live")), "AC-DC- Live.pdf");
    }

    #[test]
    fn file_name_without_title() {
        assert_eq!(export_file_name(None), "summary.pdf");
        assert_eq!(export_file_name(Some("   ")), "summary.pdf");
    }
}
