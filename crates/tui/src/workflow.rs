//! Single-flight summarization: at most one summary request is in flight,
//! and whatever the request displaced in the listing is put back when it
//! settles.

use tracing::{debug, info, warn};
use vidbrief_api_client::SummarizeResponse;
use vidbrief_core::video_ref::DIRECT_SUMMARY_TITLE;
use vidbrief_core::view::{DisplayMeta, EntryCard, EntryHandle};
use vidbrief_core::{SummaryDocument, VideoId};

use crate::listing::Listing;

pub const MALFORMED_RESPONSE_NOTICE: &str = "The server did not return valid summary data.";
pub const FETCH_FAILED_NOTICE: &str = "Failed to fetch summary. Please try again.";

/// What asked for a summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryTrigger {
    /// A listing entry was selected.
    Entry(EntryHandle),
    /// A URL or bare identifier was typed into the search box.
    Direct(VideoId),
}

#[derive(Debug)]
enum Displaced {
    Entry { handle: EntryHandle, card: EntryCard },
    Listing,
}

#[derive(Debug)]
struct InFlight {
    video: VideoId,
    meta: DisplayMeta,
    displaced: Displaced,
}

#[derive(Debug, Default)]
enum WorkflowState {
    #[default]
    Idle,
    Loading(InFlight),
}

/// A summary ready to be shown.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReady {
    pub video: VideoId,
    pub meta: DisplayMeta,
    pub document: SummaryDocument,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    Ready(SummaryReady),
    /// The server answered without a `summary` value.
    Malformed,
    Failed(String),
    /// No request was in flight for this video.
    Ignored,
}

/// Owner of the `Idle | Loading` state. `begin` and `complete` are the only
/// transitions.
#[derive(Debug, Default)]
pub struct SummaryWorkflow {
    state: WorkflowState,
}

impl SummaryWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, WorkflowState::Loading(_))
    }

    /// The process-wide busy overlay is shown exactly while loading.
    pub fn overlay_visible(&self) -> bool {
        self.is_loading()
    }

    pub fn in_flight_video(&self) -> Option<&VideoId> {
        match &self.state {
            WorkflowState::Loading(flight) => Some(&flight.video),
            WorkflowState::Idle => None,
        }
    }

    /// Start a summary. Returns the video to fetch, or `None` when the call
    /// is rejected: another summary is loading, or the entry handle no
    /// longer resolves.
    pub fn begin(&mut self, trigger: SummaryTrigger, listing: &mut Listing) -> Option<VideoId> {
        if self.is_loading() {
            debug!(?trigger, "summary already in flight, ignoring request");
            return None;
        }

        let flight = match trigger {
            SummaryTrigger::Entry(handle) => {
                let entry = listing.entry(handle)?;
                let video = entry.video.id.clone();
                let meta = DisplayMeta::for_video(&entry.video);
                let card = listing.swap_busy(handle)?;
                InFlight {
                    video,
                    meta,
                    displaced: Displaced::Entry { handle, card },
                }
            }
            SummaryTrigger::Direct(video) => {
                listing.hide();
                InFlight {
                    video,
                    meta: DisplayMeta::direct(DIRECT_SUMMARY_TITLE),
                    displaced: Displaced::Listing,
                }
            }
        };

        info!(video_id = %flight.video, "summarizing video");
        let video = flight.video.clone();
        self.state = WorkflowState::Loading(flight);
        Some(video)
    }

    /// Settle the in-flight summary for `video`: return to `Idle`, put the
    /// displaced listing content back, and report what to show.
    pub fn complete(
        &mut self,
        video: &VideoId,
        result: Result<SummarizeResponse, String>,
        listing: &mut Listing,
    ) -> WorkflowOutcome {
        if self.in_flight_video() != Some(video) {
            debug!(video_id = %video, "no matching summary in flight");
            return WorkflowOutcome::Ignored;
        }
        let WorkflowState::Loading(flight) = std::mem::take(&mut self.state) else {
            return WorkflowOutcome::Ignored;
        };

        match flight.displaced {
            Displaced::Entry { handle, card } => {
                if !listing.restore(handle, card) {
                    debug!("listing re-rendered while summarizing, nothing to restore");
                }
            }
            Displaced::Listing => listing.show(),
        }

        match result {
            Ok(response) => match response.document() {
                Some(document) => WorkflowOutcome::Ready(SummaryReady {
                    video: flight.video,
                    meta: flight.meta,
                    document,
                }),
                None => {
                    warn!(video_id = %flight.video, "summary response carried no summary");
                    WorkflowOutcome::Malformed
                }
            },
            Err(error) => {
                warn!(video_id = %flight.video, %error, "summary fetch failed");
                WorkflowOutcome::Failed(error)
            }
        }
    }
}
