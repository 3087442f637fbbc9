use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Base URL of the canonical watch page.
pub const WATCH_URL_BASE: &str = "https://www.youtube.com/watch?v=";

/// Platform video identifier (11 characters for YouTube).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch-page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("{WATCH_URL_BASE}{}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One video record of a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoSummary {
    #[serde(rename = "video_id")]
    pub id: VideoId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub channel: String,
    #[serde(default, deserialize_with = "deserialize_view_count")]
    pub views: u64,
    #[serde(rename = "postDate")]
    pub posted_at: DateTime<Utc>,
}

/// A page of videos as returned by the listing endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult {
    #[serde(default)]
    pub data: Vec<VideoSummary>,
    #[serde(default)]
    pub total_pages: u32,
}

impl PageResult {
    /// Page count normalized to at least one page.
    ///
    /// The server derives `total_pages` with an integer division that can
    /// produce zero for short result sets.
    pub fn page_count(&self) -> u32 {
        self.total_pages.max(1)
    }
}

// The default listing reports `viewCount` as a string, searches as a number.
fn deserialize_view_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
