use crate::app::App;
use crate::theme::Theme;
use crate::ui::list_inner;
use crate::views::busy;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vidbrief_core::format::truncate;
use vidbrief_core::view::{CARD_HEIGHT, EntryCard, EntryContent};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Theme::block_dim().title(list_title(app));
    let inner = list_inner(area);
    frame.render_widget(block, area);

    let entries = app.listing.entries();
    if entries.is_empty() {
        let text = if app.pagination.is_fetching() {
            "Loading videos…"
        } else {
            "No videos"
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::new().fg(Theme::TEXT_MUTED))),
            inner,
        );
        return;
    }

    let visible = usize::from(inner.height / CARD_HEIGHT);
    let selected = app.listing.selected_index();
    for (row, (index, entry)) in entries
        .iter()
        .enumerate()
        .skip(app.listing.scroll())
        .take(visible)
        .enumerate()
    {
        let offset = u16::try_from(row).unwrap_or(u16::MAX).saturating_mul(CARD_HEIGHT);
        let rect = Rect::new(inner.x, inner.y + offset, inner.width, CARD_HEIGHT);
        match &entry.content {
            EntryContent::Card(card) => render_card(frame, card, index == selected, rect),
            EntryContent::Busy(size) => busy::render_entry(frame, app.spinner(), *size, rect),
        }
    }
}

fn list_title(app: &App) -> String {
    let query = &app.pagination.state().current_query;
    if query.trim().is_empty() {
        " Videos ".to_string()
    } else {
        format!(" Results for \"{}\" ", truncate(query.trim(), 40))
    }
}

fn render_card(frame: &mut Frame, card: &EntryCard, selected: bool, area: Rect) {
    let marker = if selected { " > " } else { "   " };
    let max = usize::from(area.width.saturating_sub(4));
    let title_style = if selected {
        Style::new().fg(Theme::TEXT_PRIMARY).bg(Theme::BG_SURFACE).bold()
    } else {
        Style::new().fg(Theme::TEXT_PRIMARY).bold()
    };
    let thumb = if card.thumbnail.is_some() { "▶ " } else { "  " };

    let lines = vec![
        Line::from(vec![
            Span::styled(marker, Style::new().fg(Theme::ACCENT_BLUE)),
            Span::styled(thumb, Style::new().fg(Theme::ACCENT_RED)),
            Span::styled(fit_width(&card.title, max.saturating_sub(2)), title_style),
        ]),
        Line::from(vec![
            Span::raw("     "),
            Span::styled(
                fit_width(&card.detail, max.saturating_sub(2)),
                Style::new().fg(Theme::TEXT_SECONDARY),
            ),
        ]),
        Line::raw(""),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

/// Cut `text` to at most `max` terminal columns, marking the cut with `…`.
fn fit_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn render_navigation(frame: &mut Frame, app: &App, area: Rect) {
    let nav = app.pagination.navigation();
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let mut spans = Vec::new();

    spans.push(if nav.show_prev {
        Span::styled(" ◀ prev (p) ", key_style)
    } else {
        Span::raw(" ".repeat(12))
    });
    spans.push(Span::styled(
        nav.indicator,
        Style::new().fg(Theme::TEXT_PRIMARY).bold(),
    ));
    if nav.show_next {
        spans.push(Span::styled(" (n) next ▶ ", key_style));
    }
    if app.pagination.is_fetching() {
        spans.push(Span::styled(
            format!(" {} loading", app.spinner()),
            Style::new().fg(Theme::ACCENT_YELLOW),
        ));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center),
        area,
    );
}
