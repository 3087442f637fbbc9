//! Display formatting for view counts, post dates and server-escaped text.

use chrono::{DateTime, Utc};

use crate::VideoSummary;

/// Separator used between the parts of a detail line.
pub const DETAIL_SEPARATOR: &str = " • ";

/// Format a view count: `999`, `2K`, `2.5M`.
///
/// Thousands are rounded to whole numbers and millions to one decimal,
/// both half-up.
pub fn format_views(views: u64) -> String {
    if views >= 1_000_000 {
        let tenths = (views + 50_000) / 100_000;
        format!("{}.{}M", tenths / 10, tenths % 10)
    } else if views >= 1_000 {
        format!("{}K", (views + 500) / 1_000)
    } else {
        views.to_string()
    }
}

/// Format the time elapsed since `posted_at` as a single whole unit.
pub fn format_relative_date(posted_at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(posted_at).num_seconds().max(0);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    let (count, unit) = if seconds < 60 {
        (seconds, "second")
    } else if minutes < 60 {
        (minutes, "minute")
    } else if hours < 24 {
        (hours, "hour")
    } else if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };

    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

/// `"{channel} • {views} views • {relative date}"`.
pub fn detail_line(
    channel: &str,
    views: u64,
    posted_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    format!(
        "{}{DETAIL_SEPARATOR}{} views{DETAIL_SEPARATOR}{}",
        decode_entities(channel),
        format_views(views),
        format_relative_date(posted_at, now)
    )
}

pub fn video_detail_line(video: &VideoSummary, now: DateTime<Utc>) -> String {
    detail_line(&video.channel, video.views, video.posted_at, now)
}

/// Decode the HTML entities the listing API leaves in titles and text.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&#39;", "'")
        .replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn ago(duration: Duration) -> String {
        format_relative_date(now() - duration, now())
    }

    #[test]
    fn views_follow_unit_thresholds() {
        assert_eq!(format_views(0), "0");
        assert_eq!(format_views(999), "999");
        assert_eq!(format_views(1_000), "1K");
        assert_eq!(format_views(1_500), "2K");
        assert_eq!(format_views(2_500), "3K");
        assert_eq!(format_views(999_499), "999K");
        assert_eq!(format_views(999_999), "1000K");
        assert_eq!(format_views(1_000_000), "1.0M");
        assert_eq!(format_views(1_250_000), "1.3M");
        assert_eq!(format_views(2_500_000), "2.5M");
        assert_eq!(format_views(1_234_567_890), "1234.6M");
    }

    #[test]
    fn relative_date_reports_one_unit() {
        assert_eq!(ago(Duration::seconds(0)), "0 seconds ago");
        assert_eq!(ago(Duration::seconds(1)), "1 second ago");
        assert_eq!(ago(Duration::seconds(45)), "45 seconds ago");
        assert_eq!(ago(Duration::seconds(90)), "1 minute ago");
        assert_eq!(ago(Duration::minutes(59)), "59 minutes ago");
        assert_eq!(ago(Duration::hours(1)), "1 hour ago");
        assert_eq!(ago(Duration::hours(23)), "23 hours ago");
        assert_eq!(ago(Duration::days(1)), "1 day ago");
        assert_eq!(ago(Duration::days(29)), "29 days ago");
        assert_eq!(ago(Duration::days(30)), "1 month ago");
        assert_eq!(ago(Duration::days(364)), "12 months ago");
        assert_eq!(ago(Duration::days(365)), "1 year ago");
        assert_eq!(ago(Duration::days(400)), "1 year ago");
        assert_eq!(ago(Duration::days(800)), "2 years ago");
    }

    #[test]
    fn future_timestamps_clamp_to_zero() {
        assert_eq!(ago(Duration::seconds(-30)), "0 seconds ago");
    }

    #[test]
    fn detail_line_joins_parts() {
        let posted = now() - Duration::hours(2);
        let line = detail_line("Rust &amp; Friends", 2_500_000, posted, now());
        assert_eq!(line, "Rust & Friends • 2.5M views • 2 hours ago");
    }

    #[test]
    fn decodes_escaped_apostrophes() {
        assert_eq!(decode_entities("Don&#39;t stop"), "Don't stop");
        assert_eq!(decode_entities("a &lt;b&gt; &quot;c&quot;"), "a <b> \"c\"");
        assert_eq!(decode_entities("plain"), "plain");
    }

    #[test]
    fn truncate_adds_ellipsis() {
        assert_eq!(truncate("abcdef", 4), "abc…");
        assert_eq!(truncate("abc", 4), "abc");
    }
}
