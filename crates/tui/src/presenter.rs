use chrono::{DateTime, Utc};
use crossterm::event::KeyCode;
use ratatui::layout::Rect;
use vidbrief_core::SummaryDocument;
use vidbrief_core::view::{ModalView, build_modal};

use crate::workflow::SummaryReady;

pub const COPY_SUCCESS_NOTICE: &str = "Summary text copied to clipboard.";

/// User actions available while the summary modal is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    Copy,
    OpenLink,
    Export,
    Close,
    ScrollUp,
    ScrollDown,
}

impl ModalAction {
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::Char('c') => Some(Self::Copy),
            KeyCode::Char('o') => Some(Self::OpenLink),
            KeyCode::Char('d') => Some(Self::Export),
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') => Some(Self::Close),
            KeyCode::Up | KeyCode::Char('k') => Some(Self::ScrollUp),
            KeyCode::Down | KeyCode::Char('j') => Some(Self::ScrollDown),
            _ => None,
        }
    }
}

/// An open summary overlay.
#[derive(Debug, Clone)]
pub struct SummaryModal {
    pub view: ModalView,
    pub document: SummaryDocument,
    pub scroll: u16,
}

impl SummaryModal {
    pub fn open(ready: SummaryReady, now: DateTime<Utc>) -> Self {
        let view = build_modal(&ready.document, &ready.meta, &ready.video, now);
        Self {
            view,
            document: ready.document,
            scroll: 0,
        }
    }

    /// Title handed to the PDF export.
    pub fn export_title(&self) -> Option<&str> {
        Some(self.view.title.as_str()).filter(|t| !t.is_empty())
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}

/// Popup rectangle inside `area`: 80% wide, 80% tall, centered.
pub fn popup_rect(area: Rect) -> Rect {
    let width = (area.width.saturating_mul(4) / 5).max(area.width.min(20));
    let height = (area.height.saturating_mul(4) / 5).max(area.height.min(8));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

/// Whether a click at (`column`, `row`) lands on the backdrop around the
/// popup rather than on its content.
pub fn is_backdrop_click(area: Rect, column: u16, row: u16) -> bool {
    let popup = popup_rect(area);
    let inside = column >= popup.x
        && column < popup.x + popup.width
        && row >= popup.y
        && row < popup.y + popup.height;
    !inside
}
