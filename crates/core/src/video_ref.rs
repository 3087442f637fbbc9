use regex::Regex;
use std::sync::LazyLock;

use crate::VideoId;

/// Title shown for summaries requested by URL or bare identifier.
pub const DIRECT_SUMMARY_TITLE: &str = "YouTube Video Summary";

const ID_LEN: usize = 11;

static VIDEO_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:www\.|m\.)?(?:youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/|v/)?|youtu\.be/)(?P<id>[A-Za-z0-9_-]{11})(?:$|[^A-Za-z0-9_-])",
    )
    .unwrap()
});

/// How a search box entry should be handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchInput {
    /// The entry names one video: summarize it directly.
    Video(VideoId),
    /// Free-text query for the listing endpoints.
    Query(String),
}

pub fn classify_query(input: &str) -> SearchInput {
    match parse_video_reference(input) {
        Some(id) => SearchInput::Video(id),
        None => SearchInput::Query(input.to_string()),
    }
}

/// Extract a video identifier from a platform URL or a bare identifier.
pub fn parse_video_reference(input: &str) -> Option<VideoId> {
    let trimmed = input.trim();
    if let Some(caps) = VIDEO_URL_RE.captures(trimmed) {
        return Some(VideoId::new(&caps["id"]));
    }
    is_bare_identifier(trimmed).then(|| VideoId::new(trimmed))
}

// A lowercase-only word such as "programming" is a search, not an id.
fn is_bare_identifier(candidate: &str) -> bool {
    candidate.len() == ID_LEN
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !candidate.chars().all(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(input: &str) -> Option<String> {
        parse_video_reference(input).map(|v| v.as_str().to_string())
    }

    #[test]
    fn recognizes_platform_urls() {
        let expected = Some("dQw4w9WgXcQ".to_string());
        for url in [
            "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "http://youtube.com/watch?v=dQw4w9WgXcQ&t=42s",
            "youtube.com/watch?feature=share&v=dQw4w9WgXcQ",
            "https://m.youtube.com/watch?v=dQw4w9WgXcQ",
            "https://youtu.be/dQw4w9WgXcQ",
            "youtu.be/dQw4w9WgXcQ?si=abc",
            "https://www.youtube.com/shorts/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/dQw4w9WgXcQ",
            "https://www.youtube.com/dQw4w9WgXcQ",
            "  https://youtu.be/dQw4w9WgXcQ  ",
        ] {
            assert_eq!(id(url), expected, "url {url}");
        }
    }

    #[test]
    fn recognizes_bare_identifiers() {
        assert_eq!(id("dQw4w9WgXcQ").as_deref(), Some("dQw4w9WgXcQ"));
        assert_eq!(id("a_b-c1D2e3F").as_deref(), Some("a_b-c1D2e3F"));
    }

    #[test]
    fn plain_searches_are_not_references() {
        for query in [
            "programming",
            "rust tutorial",
            "dQw4w9WgXcQx",
            "dQw4w9WgXc",
            "https://www.youtube.com/channelsABCDEF",
            "https://www.youtube.com/playlist?list=PL123",
            "https://vimeo.com/dQw4w9WgXcQ",
            "",
        ] {
            assert_eq!(id(query), None, "query {query:?}");
        }
    }

    #[test]
    fn classify_keeps_query_text() {
        assert_eq!(
            classify_query("lofi beats"),
            SearchInput::Query("lofi beats".to_string())
        );
        assert_eq!(
            classify_query("dQw4w9WgXcQ"),
            SearchInput::Video(VideoId::new("dQw4w9WgXcQ"))
        );
    }
}
