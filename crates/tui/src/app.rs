use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tracing::debug;

use crate::async_ops::{AsyncCommand, CommandResult};
use crate::listing::Listing;
use crate::pagination::{ListingFetch, ListingOutcome, PaginationController, SearchAction};
use crate::platform::Platform;
use crate::presenter::{COPY_SUCCESS_NOTICE, ModalAction, SummaryModal, is_backdrop_click};
use crate::ui::{entry_at_row, screen_layout};
use crate::workflow::{
    FETCH_FAILED_NOTICE, MALFORMED_RESPONSE_NOTICE, SummaryTrigger, SummaryWorkflow,
    WorkflowOutcome,
};

pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

/// The search box at the top of the screen.
#[derive(Debug, Default)]
pub struct SearchBox {
    pub editing: bool,
    pub buffer: String,
}

pub struct App {
    pub pagination: PaginationController,
    pub listing: Listing,
    pub workflow: SummaryWorkflow,
    pub modal: Option<SummaryModal>,
    pub search: SearchBox,
    pub flash_message: Option<(String, FlashLevel)>,
    pub spinner_frame: usize,
    pub viewport: Rect,
    pending_commands: Vec<AsyncCommand>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            pagination: PaginationController::new(),
            listing: Listing::new(),
            workflow: SummaryWorkflow::new(),
            modal: None,
            search: SearchBox::default(),
            flash_message: None,
            spinner_frame: 0,
            viewport: Rect::new(0, 0, 80, 24),
            pending_commands: Vec::new(),
        }
    }

    /// Commands queued since the last call, in issue order.
    pub fn take_commands(&mut self) -> Vec<AsyncCommand> {
        std::mem::take(&mut self.pending_commands)
    }

    fn queue_listing(&mut self, fetch: ListingFetch) {
        self.pending_commands.push(AsyncCommand::FetchListing {
            seq: fetch.seq,
            request: fetch.request,
        });
    }

    // ── Pagination ───────────────────────────────────────────────────

    pub fn load_initial(&mut self) {
        let fetch = self.pagination.load_initial();
        self.queue_listing(fetch);
    }

    pub fn submit_search(&mut self, query: &str) {
        match self.pagination.search(query) {
            SearchAction::Fetch(fetch) => self.queue_listing(fetch),
            SearchAction::Summarize(video) => {
                self.summarize(SummaryTrigger::Direct(video));
            }
        }
    }

    pub fn next_page(&mut self) {
        if let Some(fetch) = self.pagination.next_page() {
            self.queue_listing(fetch);
        }
    }

    pub fn prev_page(&mut self) {
        if let Some(fetch) = self.pagination.prev_page() {
            self.queue_listing(fetch);
        }
    }

    // ── Summaries ────────────────────────────────────────────────────

    /// Start a summary. Returns false when the request was rejected.
    pub fn summarize(&mut self, trigger: SummaryTrigger) -> bool {
        match self.workflow.begin(trigger, &mut self.listing) {
            Some(video) => {
                self.pending_commands.push(AsyncCommand::Summarize { video });
                true
            }
            None => false,
        }
    }

    pub fn summarize_selected(&mut self) -> bool {
        if self.listing.is_hidden() {
            return false;
        }
        match self.listing.selected_handle() {
            Some(handle) => self.summarize(SummaryTrigger::Entry(handle)),
            None => false,
        }
    }

    pub fn apply_command_result(&mut self, result: CommandResult, now: DateTime<Utc>) {
        match result {
            CommandResult::Listing { seq, result } => match self.pagination.apply(seq, result) {
                ListingOutcome::Applied(page) => {
                    self.listing.render(&page, now);
                    if page.data.is_empty() {
                        self.flash_info("No videos found");
                    }
                }
                ListingOutcome::Stale => {}
                ListingOutcome::Failed(error) => {
                    self.flash_error(format!("Failed to load videos: {error}"));
                }
            },
            CommandResult::Summary { video, result } => {
                match self.workflow.complete(&video, result, &mut self.listing) {
                    WorkflowOutcome::Ready(ready) => {
                        self.modal = Some(SummaryModal::open(ready, now));
                    }
                    WorkflowOutcome::Malformed => self.flash_error(MALFORMED_RESPONSE_NOTICE),
                    WorkflowOutcome::Failed(error) => {
                        self.flash_error(format!("{FETCH_FAILED_NOTICE} ({error})"));
                    }
                    WorkflowOutcome::Ignored => {}
                }
            }
        }
    }

    // ── Modal ────────────────────────────────────────────────────────

    pub fn handle_modal_action(&mut self, action: ModalAction, platform: &mut dyn Platform) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match action {
            ModalAction::Copy => {
                let text = modal.view.plain_text();
                match platform.copy_text(&text) {
                    Ok(()) => self.flash_success(COPY_SUCCESS_NOTICE),
                    Err(e) => self.flash_error(format!("Copy failed: {e:#}")),
                }
            }
            ModalAction::OpenLink => {
                let url = modal.view.video_url.clone();
                match platform.open_url(&url) {
                    Ok(()) => self.flash_info(format!("Opened {url}")),
                    Err(e) => self.flash_error(format!("Could not open link: {e:#}")),
                }
            }
            ModalAction::Export => {
                match platform.export_pdf(&modal.document, modal.export_title()) {
                    Ok(path) => self.flash_success(format!("Saved {}", path.display())),
                    Err(e) => self.flash_error(format!("Export failed: {e:#}")),
                }
            }
            ModalAction::Close => self.modal = None,
            ModalAction::ScrollUp => modal.scroll_up(),
            ModalAction::ScrollDown => modal.scroll_down(),
        }
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Handle a key press. Returns true when the app should quit.
    pub fn handle_key(&mut self, key: KeyCode, platform: &mut dyn Platform) -> bool {
        self.flash_message = None;

        if self.modal.is_some() {
            if let Some(action) = ModalAction::from_key(key) {
                self.handle_modal_action(action, platform);
            }
            return false;
        }

        if self.search.editing {
            self.handle_search_key(key);
            return false;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('/') | KeyCode::Char('s') => {
                self.search.editing = true;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.listing.select_next();
                self.follow_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.listing.select_prev();
                self.follow_selection();
            }
            KeyCode::Enter => {
                self.summarize_selected();
            }
            KeyCode::Right | KeyCode::Char('n') => self.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.prev_page(),
            KeyCode::Char('r') => {
                self.search.buffer.clear();
                self.load_initial();
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter => {
                self.search.editing = false;
                let query = self.search.buffer.clone();
                self.submit_search(&query);
            }
            KeyCode::Esc => self.search.editing = false,
            KeyCode::Backspace => {
                self.search.buffer.pop();
            }
            KeyCode::Char(c) => self.search.buffer.push(c),
            _ => {}
        }
    }

    /// Handle a mouse event. Returns true when the app should quit.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, platform: &mut dyn Platform) -> bool {
        if self.modal.is_some() {
            match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    if is_backdrop_click(self.viewport, mouse.column, mouse.row) {
                        self.handle_modal_action(ModalAction::Close, platform);
                    }
                }
                MouseEventKind::ScrollUp => {
                    self.handle_modal_action(ModalAction::ScrollUp, platform);
                }
                MouseEventKind::ScrollDown => {
                    self.handle_modal_action(ModalAction::ScrollDown, platform);
                }
                _ => {}
            }
            return false;
        }

        match mouse.kind {
            MouseEventKind::ScrollUp => {
                self.listing.select_prev();
                self.follow_selection();
            }
            MouseEventKind::ScrollDown => {
                self.listing.select_next();
                self.follow_selection();
            }
            MouseEventKind::Down(MouseButton::Left) => {
                if self.listing.is_hidden() {
                    return false;
                }
                let list_area = screen_layout(self.viewport).list;
                let scroll = self.listing.scroll();
                if let Some(index) = entry_at_row(list_area, scroll, mouse.column, mouse.row)
                    && let Some(handle) = self.listing.handle_at(index)
                {
                    self.listing.select(index);
                    if !self.summarize(SummaryTrigger::Entry(handle)) {
                        debug!(index, "entry click ignored");
                    }
                }
            }
            _ => {}
        }
        false
    }

    // ── Viewport / ticks ─────────────────────────────────────────────

    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        self.listing.set_viewport_width(screen_layout(area).list.width);
    }

    fn follow_selection(&mut self) {
        let rows = screen_layout(self.viewport).list.height;
        let visible = usize::from(rows / vidbrief_core::view::CARD_HEIGHT);
        self.listing.follow_selection(visible);
    }

    pub fn on_tick(&mut self) {
        self.spinner_frame = (self.spinner_frame + 1) % SPINNER_FRAMES.len();
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
    }

    // ── Flash messages ───────────────────────────────────────────────

    pub fn flash_success(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Success));
    }

    pub fn flash_error(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Error));
    }

    pub fn flash_info(&mut self, msg: impl Into<String>) {
        self.flash_message = Some((msg.into(), FlashLevel::Info));
    }
}
