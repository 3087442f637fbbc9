use crate::app::App;
use crate::theme::Theme;
use crate::views::{busy, summary_modal, video_list};
use ratatui::layout::{Margin, Position};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use vidbrief_core::view::CARD_HEIGHT;

/// Fixed screen regions, shared by drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub list: Rect,
    pub nav: Rect,
    pub footer: Rect,
}

pub fn screen_layout(area: Rect) -> ScreenLayout {
    let [header, list, nav, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);
    ScreenLayout {
        header,
        list,
        nav,
        footer,
    }
}

/// Content rectangle of the bordered list block.
pub fn list_inner(list: Rect) -> Rect {
    list.inner(Margin::new(1, 1))
}

/// Index of the entry drawn at (`column`, `row`), if any. Rows below the
/// last whole card slot hit nothing.
pub fn entry_at_row(list: Rect, scroll: usize, column: u16, row: u16) -> Option<usize> {
    let inner = list_inner(list);
    if !inner.contains(Position::new(column, row)) {
        return None;
    }
    let slot = (row - inner.y) / CARD_HEIGHT;
    if slot >= inner.height / CARD_HEIGHT {
        return None;
    }
    Some(scroll + usize::from(slot))
}

pub fn render(frame: &mut Frame, app: &App) {
    let layout = screen_layout(frame.area());

    render_header(frame, app, layout.header);

    if app.listing.is_hidden() {
        busy::render_region(frame, app.spinner(), layout.list);
    } else {
        video_list::render(frame, app, layout.list);
    }
    video_list::render_navigation(frame, app, layout.nav);

    render_footer(frame, app, layout.footer);

    if app.workflow.overlay_visible() {
        busy::render_overlay(frame, app.spinner());
    }

    if let Some(ref modal) = app.modal {
        summary_modal::render(frame, modal);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = if app.search.editing {
        Theme::block_accent()
    } else {
        Theme::block()
    };
    let block = block.title(" vidbrief ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut spans = vec![Span::styled(" Search: ", Style::new().fg(Theme::TEXT_SECONDARY))];
    if app.search.buffer.is_empty() && !app.search.editing {
        spans.push(Span::styled(
            "press / to search, or paste a video link",
            Style::new().fg(Theme::TEXT_HINT),
        ));
    } else {
        spans.push(Span::styled(
            app.search.buffer.as_str(),
            Style::new().fg(Theme::TEXT_PRIMARY),
        ));
    }
    if app.search.editing {
        spans.push(Span::styled("█", Style::new().fg(Theme::ACCENT_BLUE)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), inner);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);

    let hints: &[(&str, &str)] = if app.modal.is_some() {
        &[
            ("c ", "copy  "),
            ("o ", "open  "),
            ("d ", "pdf  "),
            ("Esc ", "close"),
        ]
    } else if app.search.editing {
        &[("Enter ", "search  "), ("Esc ", "cancel")]
    } else {
        &[
            ("/ ", "search  "),
            ("Enter ", "summarize  "),
            ("n/p ", "page  "),
            ("r ", "reload  "),
            ("q ", "quit"),
        ]
    };

    let mut spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, desc)| {
            [
                Span::styled(*key, key_style),
                Span::styled(*desc, desc_style),
            ]
        })
        .collect();

    if let Some((ref msg, level)) = app.flash_message {
        spans.push(Span::styled("  ", Style::new()));
        spans.push(Span::styled(
            msg.as_str(),
            Style::new().fg(Theme::flash_color(level)),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
