use crate::presenter::{SummaryModal, popup_rect};
use crate::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph, Wrap};
use vidbrief_core::view::ModalBlock;

pub fn render(frame: &mut Frame, modal: &SummaryModal) {
    let popup = popup_rect(frame.area());
    frame.render_widget(Clear, popup);

    let block = Theme::block_accent()
        .title(" Summary ")
        .padding(Theme::PADDING_COMPACT);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [body, link, hints] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let view = &modal.view;
    let mut lines = vec![
        Line::from(Span::raw(view.marker)),
        Line::from(Span::styled(
            view.title.as_str(),
            Style::new().fg(Theme::TEXT_PRIMARY).bold(),
        )),
    ];
    if let Some(subtitle) = &view.subtitle {
        lines.push(Line::from(Span::styled(
            subtitle.as_str(),
            Style::new().fg(Theme::TEXT_SECONDARY),
        )));
    }
    for block in &view.blocks {
        lines.push(Line::raw(""));
        match block {
            ModalBlock::Section { heading, bullets } => {
                lines.push(Line::from(Span::styled(
                    heading.as_str(),
                    Style::new().fg(Theme::ACCENT_BLUE).bold(),
                )));
                for bullet in bullets {
                    lines.push(Line::from(vec![
                        Span::styled("  • ", Style::new().fg(Theme::TEXT_MUTED)),
                        Span::styled(bullet.as_str(), Style::new().fg(Theme::TEXT_CONTENT)),
                    ]));
                }
            }
            ModalBlock::Placeholder { message, .. } | ModalBlock::Malformed { message } => {
                lines.push(Line::from(Span::styled(
                    message.as_str(),
                    Style::new().fg(Theme::ACCENT_RED),
                )));
            }
        }
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((modal.scroll, 0)),
        body,
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            view.video_url.as_str(),
            Style::new().fg(Theme::ACCENT_CYAN).underlined(),
        )),
        link,
    );

    let key_style = Style::new().fg(Theme::TEXT_KEY);
    let desc_style = Style::new().fg(Theme::TEXT_KEY_DESC);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("c ", key_style),
            Span::styled("copy  ", desc_style),
            Span::styled("o ", key_style),
            Span::styled("watch  ", desc_style),
            Span::styled("d ", key_style),
            Span::styled("download PDF  ", desc_style),
            Span::styled("Esc ", key_style),
            Span::styled("close", desc_style),
        ])),
        hints,
    );
}
