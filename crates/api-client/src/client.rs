use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;
use vidbrief_core::{PageResult, VideoId};

use crate::error::{ApiError, Result};
use crate::service::{ListingRequest, SummarizeResponse, VideoService};

/// Typed HTTP client for the listing and summarization server.
///
/// The server keeps next/previous page tokens in its session cookie, so the
/// underlying client always carries a cookie store.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url`. `timeout` of `None` leaves requests
    /// unbounded.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?, base_url))
    }

    /// Create from an existing `reqwest::Client` (e.g. shared in tests).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ── Listing ───────────────────────────────────────────────────────────

    pub async fn videos(&self) -> Result<PageResult> {
        self.list_page(&ListingRequest::Default).await
    }

    pub async fn search(&self, query: &str) -> Result<PageResult> {
        self.list_page(&ListingRequest::Search(query.to_string()))
            .await
    }

    pub async fn next_page(&self, query: &str) -> Result<PageResult> {
        self.list_page(&ListingRequest::Next(query.to_string())).await
    }

    pub async fn prev_page(&self, query: &str) -> Result<PageResult> {
        self.list_page(&ListingRequest::Prev(query.to_string())).await
    }

    async fn list_page(&self, request: &ListingRequest) -> Result<PageResult> {
        let mut req = self.client.get(self.url(request.path()));
        if let Some(query) = request.query() {
            req = req.query(&[("query", query)]);
        }
        debug!(path = request.path(), query = ?request.query(), "fetching listing");
        let resp = req.send().await?;
        parse_response(resp).await
    }

    // ── Summaries ─────────────────────────────────────────────────────────

    pub async fn summarize_video(&self, video: &VideoId) -> Result<SummarizeResponse> {
        debug!(video_id = %video, "requesting summary");
        let resp = self
            .client
            .get(self.url("/summarize"))
            .query(&[("videoId", video.as_str())])
            .send()
            .await?;
        parse_response(resp).await
    }
}

#[async_trait]
impl VideoService for ApiClient {
    async fn list(&self, request: &ListingRequest) -> Result<PageResult> {
        self.list_page(request).await
    }

    async fn summarize(&self, video: &VideoId) -> Result<SummarizeResponse> {
        self.summarize_video(video).await
    }
}

/// Parse an HTTP response: return the deserialized body on 2xx, or an error
/// carrying the status and the server's message.
async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status {
            status,
            message: error_message(&body),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_drops_trailing_slash() {
        let client = ApiClient::with_client(reqwest::Client::new(), "http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url("/videos"), "http://localhost:5000/videos");
    }

    #[test]
    fn error_message_prefers_server_error_field() {
        assert_eq!(
            error_message(r#"{"error": "Search query is required", "data": []}"#),
            "Search query is required"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }
}
