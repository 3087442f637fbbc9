use crate::{PageResult, Section, SummaryDocument, VideoId, VideoSummary};
use chrono::{Duration, Utc};
use serde_json::{Value, json};

/// Video posted two hours ago with 1,500 views.
pub fn video(id: &str, title: &str) -> VideoSummary {
    VideoSummary {
        id: VideoId::new(id),
        title: title.to_string(),
        thumbnail: Some(format!("https://i.ytimg.com/vi/{id}/hqdefault.jpg")),
        channel: "Test Channel".to_string(),
        views: 1_500,
        posted_at: Utc::now() - Duration::hours(2),
    }
}

/// Page of `count` videos with ids `vid{page}x{i}` padded to 11 characters.
pub fn page(page_number: u32, count: usize, total_pages: u32) -> PageResult {
    PageResult {
        data: (0..count)
            .map(|i| {
                let id = format!("vid{page_number:02}x{i:05}");
                video(&id, &format!("Video {page_number}.{i}"))
            })
            .collect(),
        total_pages,
    }
}

pub fn document(headers: &[&str]) -> SummaryDocument {
    SummaryDocument::from_sections(
        headers
            .iter()
            .map(|h| Section::new(*h, format!("{h} first"), format!("{h} second"))),
    )
}

/// Raw `/summarize` payload with one well-formed section per header.
pub fn summary_json(headers: &[&str]) -> Value {
    let sections: Vec<Value> = headers
        .iter()
        .map(|h| json!({ "header": h, "bullets": [format!("{h} first"), format!("{h} second")] }))
        .collect();
    json!({ "sections": sections })
}
