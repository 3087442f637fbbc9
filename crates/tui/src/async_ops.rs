use vidbrief_api_client::{ListingRequest, SummarizeResponse, VideoService};
use vidbrief_core::{PageResult, VideoId};

/// Commands that require async I/O (network calls).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsyncCommand {
    FetchListing { seq: u64, request: ListingRequest },
    Summarize { video: VideoId },
}

/// Results returned by async commands.
#[derive(Debug)]
pub enum CommandResult {
    Listing {
        seq: u64,
        result: Result<PageResult, String>,
    },
    Summary {
        video: VideoId,
        result: Result<SummarizeResponse, String>,
    },
}

pub async fn execute(cmd: AsyncCommand, service: &dyn VideoService) -> CommandResult {
    match cmd {
        AsyncCommand::FetchListing { seq, request } => {
            let result = service.list(&request).await.map_err(|e| format!("{e}"));
            CommandResult::Listing { seq, result }
        }

        AsyncCommand::Summarize { video } => {
            let result = service.summarize(&video).await.map_err(|e| format!("{e}"));
            CommandResult::Summary { video, result }
        }
    }
}
