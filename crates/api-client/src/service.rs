use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use vidbrief_core::{PageResult, SummaryDocument, VideoId};

use crate::error::Result;

/// Which listing endpoint a page fetch goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRequest {
    /// `GET /videos`
    Default,
    /// `GET /search?query=`
    Search(String),
    /// `GET /next?query=`
    Next(String),
    /// `GET /prev?query=`
    Prev(String),
}

impl ListingRequest {
    pub fn path(&self) -> &'static str {
        match self {
            ListingRequest::Default => "/videos",
            ListingRequest::Search(_) => "/search",
            ListingRequest::Next(_) => "/next",
            ListingRequest::Prev(_) => "/prev",
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            ListingRequest::Default => None,
            ListingRequest::Search(q) | ListingRequest::Next(q) | ListingRequest::Prev(q) => {
                Some(q)
            }
        }
    }
}

/// Body of `GET /summarize`.
///
/// Only an object body can carry `summary`; arrays and scalars decode as a
/// response without one.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct SummarizeResponse {
    pub summary: Option<Value>,
}

impl From<Value> for SummarizeResponse {
    fn from(body: Value) -> Self {
        let summary = match body {
            Value::Object(mut fields) => fields.remove("summary"),
            _ => None,
        };
        Self { summary }
    }
}

impl SummarizeResponse {
    /// The decoded summary, or `None` when the field is absent or null.
    pub fn document(&self) -> Option<SummaryDocument> {
        self.summary
            .as_ref()
            .filter(|value| !value.is_null())
            .map(SummaryDocument::from_value)
    }
}

/// The server operations the client controller depends on.
#[async_trait]
pub trait VideoService: Send + Sync {
    async fn list(&self, request: &ListingRequest) -> Result<PageResult>;

    async fn summarize(&self, video: &VideoId) -> Result<SummarizeResponse>;
}
