use tracing::{debug, warn};
use vidbrief_api_client::ListingRequest;
use vidbrief_core::video_ref::{SearchInput, classify_query};
use vidbrief_core::view::{NavigationView, navigation};
use vidbrief_core::{PageResult, VideoId};

/// Page position of the listing. `1 <= current_page <= total_pages` holds
/// in every reachable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: u32,
    pub current_query: String,
    pub total_pages: u32,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            current_page: 1,
            current_query: String::new(),
            total_pages: 1,
        }
    }
}

/// A listing fetch to issue. `seq` identifies the response that answers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFetch {
    pub seq: u64,
    pub request: ListingRequest,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    Fetch(ListingFetch),
    /// The query named a single video; summarize it instead of listing.
    Summarize(VideoId),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListingOutcome {
    Applied(PageResult),
    /// Answer to a request that has since been superseded.
    Stale,
    Failed(String),
}

/// Owns the pagination state and decides which listing request each user
/// action turns into.
#[derive(Debug, Default)]
pub struct PaginationController {
    state: PaginationState,
    committed: PaginationState,
    next_seq: u64,
    latest_seq: Option<u64>,
}

impl PaginationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn navigation(&self) -> NavigationView {
        navigation(self.state.current_page, self.state.total_pages)
    }

    /// Whether a listing request is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.latest_seq.is_some()
    }

    pub fn load_initial(&mut self) -> ListingFetch {
        self.state.current_page = 1;
        self.state.current_query.clear();
        self.issue(ListingRequest::Default)
    }

    pub fn search(&mut self, query: &str) -> SearchAction {
        self.state.current_page = 1;
        self.state.current_query = query.to_string();

        match classify_query(query) {
            SearchInput::Video(video) => {
                // No fetch follows, so the reset is final right away and any
                // page still loading is superseded.
                self.latest_seq = None;
                self.committed = self.state.clone();
                SearchAction::Summarize(video)
            }
            SearchInput::Query(q) if q.trim().is_empty() => {
                SearchAction::Fetch(self.issue(ListingRequest::Default))
            }
            SearchInput::Query(q) => SearchAction::Fetch(self.issue(ListingRequest::Search(q))),
        }
    }

    pub fn next_page(&mut self) -> Option<ListingFetch> {
        if self.state.current_page >= self.state.total_pages {
            return None;
        }
        self.state.current_page += 1;
        let query = self.state.current_query.clone();
        Some(self.issue(ListingRequest::Next(query)))
    }

    pub fn prev_page(&mut self) -> Option<ListingFetch> {
        if self.state.current_page <= 1 {
            return None;
        }
        self.state.current_page -= 1;
        let query = self.state.current_query.clone();
        Some(self.issue(ListingRequest::Prev(query)))
    }

    /// Apply the response to listing fetch `seq`.
    ///
    /// Only the most recently issued fetch is applied. When it fails the
    /// state rolls back to the last page that was rendered.
    pub fn apply(&mut self, seq: u64, result: Result<PageResult, String>) -> ListingOutcome {
        if self.latest_seq != Some(seq) {
            debug!(seq, latest = ?self.latest_seq, "dropping stale listing response");
            return ListingOutcome::Stale;
        }
        self.latest_seq = None;

        match result {
            Ok(page) => {
                self.state.total_pages = page.page_count();
                self.state.current_page = self.state.current_page.min(self.state.total_pages);
                self.committed = self.state.clone();
                ListingOutcome::Applied(page)
            }
            Err(error) => {
                warn!(seq, %error, "listing fetch failed");
                self.state = self.committed.clone();
                ListingOutcome::Failed(error)
            }
        }
    }

    fn issue(&mut self, request: ListingRequest) -> ListingFetch {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.latest_seq = Some(seq);
        debug!(seq, path = request.path(), "issuing listing fetch");
        ListingFetch { seq, request }
    }
}
