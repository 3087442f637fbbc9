use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use vidbrief_core::view::EntrySize;

const OVERLAY_LABEL: &str = "Summarizing…";

/// Busy indicator drawn in place of a listing entry, occupying exactly the
/// measured size of the card it replaced.
pub fn render_entry(frame: &mut Frame, spinner: &str, size: EntrySize, area: Rect) {
    let rect = Rect::new(
        area.x,
        area.y,
        size.width.max(1).min(area.width),
        size.height.min(area.height),
    );
    let line = Line::from(vec![
        Span::raw("   "),
        Span::styled(spinner.to_string(), Style::new().fg(Theme::ACCENT_YELLOW)),
        Span::styled(" summarizing", Style::new().fg(Theme::TEXT_SECONDARY)),
    ]);
    frame.render_widget(Paragraph::new(line), rect);
}

/// Full-area indicator shown while the listing region is hidden.
pub fn render_region(frame: &mut Frame, spinner: &str, area: Rect) {
    let block = Theme::block_dim();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);
    let line = Line::from(vec![
        Span::styled(spinner.to_string(), Style::new().fg(Theme::ACCENT_YELLOW)),
        Span::styled(" Summarizing video…", Style::new().fg(Theme::TEXT_PRIMARY)),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), middle);
}

/// Small process-wide overlay in the top-right corner.
pub fn render_overlay(frame: &mut Frame, spinner: &str) {
    let area = frame.area();
    let width = 20u16.min(area.width);
    let height = 3u16.min(area.height);
    let rect = Rect::new(area.x + area.width - width, area.y, width, height);

    frame.render_widget(Clear, rect);
    let block = Theme::block_accent();
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    let line = Line::from(vec![
        Span::styled(spinner.to_string(), Style::new().fg(Theme::ACCENT_YELLOW)),
        Span::raw(" "),
        Span::styled(OVERLAY_LABEL, Style::new().fg(Theme::TEXT_PRIMARY).bold()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);
}
