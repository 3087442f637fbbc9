//! Declarative view descriptions built from the data model.
//!
//! Everything here is pure: the TUI draws these values, tests inspect them.

use chrono::{DateTime, Utc};
use unicode_width::UnicodeWidthStr;

use crate::format::{decode_entities, detail_line, video_detail_line};
use crate::{PageResult, SectionSlot, SummaryDocument, VideoId, VideoSummary};

/// Rows occupied by one listing card (title, detail line, spacer).
pub const CARD_HEIGHT: u16 = 3;

/// Marker shown above the summary title.
pub const SUMMARY_MARKER: &str = "✨";

pub const MALFORMED_SUMMARY_MESSAGE: &str = "Summary data is not in the expected format.";

// ── Listing ─────────────────────────────────────────────────────────────

/// Identifies an entry produced by one listing render pass.
///
/// Handles from an earlier pass never match entries of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryHandle {
    generation: u64,
    index: usize,
}

impl EntryHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySize {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryCard {
    pub thumbnail: Option<String>,
    pub title: String,
    pub detail: String,
}

impl EntryCard {
    /// Size the card occupies when drawn in a column `max_width` wide.
    pub fn measure(&self, max_width: u16) -> EntrySize {
        let content = self.title.width().max(self.detail.width());
        let width = u16::try_from(content).unwrap_or(u16::MAX);
        EntrySize {
            width: width.min(max_width),
            height: CARD_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    Card(EntryCard),
    /// In-place busy indicator sized like the card it replaced.
    Busy(EntrySize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingEntry {
    pub handle: EntryHandle,
    pub video: VideoSummary,
    pub content: EntryContent,
}

/// Build the entries for one page of results.
pub fn render_listing(
    page: &PageResult,
    generation: u64,
    now: DateTime<Utc>,
) -> Vec<ListingEntry> {
    page.data
        .iter()
        .enumerate()
        .map(|(index, video)| ListingEntry {
            handle: EntryHandle { generation, index },
            video: video.clone(),
            content: EntryContent::Card(EntryCard {
                thumbnail: video.thumbnail.clone(),
                title: decode_entities(&video.title),
                detail: video_detail_line(video, now),
            }),
        })
        .collect()
}

// ── Navigation ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationView {
    pub show_prev: bool,
    pub show_next: bool,
    pub indicator: String,
}

pub fn navigation(current_page: u32, total_pages: u32) -> NavigationView {
    NavigationView {
        show_prev: current_page != 1,
        show_next: current_page != total_pages,
        indicator: format!("Page {current_page} of {total_pages}"),
    }
}

// ── Summary modal ───────────────────────────────────────────────────────

/// Metadata shown above a summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMeta {
    pub title: String,
    pub subtitle: Option<SubtitleMeta>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleMeta {
    pub channel: String,
    pub views: u64,
    pub posted_at: DateTime<Utc>,
}

impl DisplayMeta {
    pub fn for_video(video: &VideoSummary) -> Self {
        Self {
            title: video.title.clone(),
            subtitle: Some(SubtitleMeta {
                channel: video.channel.clone(),
                views: video.views,
                posted_at: video.posted_at,
            }),
        }
    }

    /// Metadata for a summary requested without a backing listing entry.
    pub fn direct(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBlock {
    Section { heading: String, bullets: Vec<String> },
    /// A section at `position` (1-based) that failed validation.
    Placeholder { position: usize, message: String },
    /// The summary carried no section list at all.
    Malformed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalView {
    pub marker: &'static str,
    pub title: String,
    pub subtitle: Option<String>,
    pub blocks: Vec<ModalBlock>,
    pub video_url: String,
}

pub fn placeholder_message(position: usize) -> String {
    format!("Incomplete data for section {position}. Unable to display the summary.")
}

pub fn build_modal(
    document: &SummaryDocument,
    meta: &DisplayMeta,
    video: &VideoId,
    now: DateTime<Utc>,
) -> ModalView {
    let blocks = match document.sections() {
        Some(slots) => slots
            .iter()
            .enumerate()
            .map(|(i, slot)| match slot {
                SectionSlot::Valid(section) => ModalBlock::Section {
                    heading: decode_entities(&section.header),
                    bullets: section.bullets.iter().map(|b| decode_entities(b)).collect(),
                },
                SectionSlot::Invalid { .. } => ModalBlock::Placeholder {
                    position: i + 1,
                    message: placeholder_message(i + 1),
                },
            })
            .collect(),
        None => vec![ModalBlock::Malformed {
            message: MALFORMED_SUMMARY_MESSAGE.to_string(),
        }],
    };

    ModalView {
        marker: SUMMARY_MARKER,
        title: decode_entities(&meta.title),
        subtitle: meta
            .subtitle
            .as_ref()
            .map(|s| detail_line(&s.channel, s.views, s.posted_at, now)),
        blocks,
        video_url: video.watch_url(),
    }
}

impl ModalView {
    pub fn section_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, ModalBlock::Section { .. }))
            .count()
    }

    /// Text content of the rendered summary, one element per line.
    pub fn plain_text(&self) -> String {
        let mut lines = vec![self.marker.to_string(), self.title.clone()];
        if let Some(subtitle) = &self.subtitle {
            lines.push(subtitle.clone());
        }
        for block in &self.blocks {
            lines.push(String::new());
            match block {
                ModalBlock::Section { heading, bullets } => {
                    lines.push(heading.clone());
                    lines.extend(bullets.iter().map(|b| format!("• {b}")));
                }
                ModalBlock::Placeholder { message, .. } | ModalBlock::Malformed { message } => {
                    lines.push(message.clone());
                }
            }
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Section;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn video(id: &str, title: &str) -> VideoSummary {
        VideoSummary {
            id: VideoId::new(id),
            title: title.to_string(),
            thumbnail: None,
            channel: "Channel".to_string(),
            views: 1_500,
            posted_at: now() - Duration::days(3),
        }
    }

    #[test]
    fn listing_entries_carry_handles_and_detail_lines() {
        let page = PageResult {
            data: vec![
                video("aaaaaaaaaaA", "First"),
                video("bbbbbbbbbbB", "It&#39;s second"),
            ],
            total_pages: 4,
        };
        let entries = render_listing(&page, 7, now());

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].handle.generation(), 7);
        assert_eq!(entries[1].handle.index(), 1);
        let EntryContent::Card(card) = &entries[1].content else {
            panic!("expected card");
        };
        assert_eq!(card.title, "It's second");
        assert_eq!(card.detail, "Channel • 2K views • 3 days ago");
    }

    #[test]
    fn handles_differ_between_generations() {
        let page = PageResult {
            data: vec![video("aaaaaaaaaaA", "First")],
            total_pages: 1,
        };
        let first = render_listing(&page, 1, now());
        let second = render_listing(&page, 2, now());
        assert_ne!(first[0].handle, second[0].handle);
    }

    #[test]
    fn card_measure_is_bounded_by_viewport() {
        let card = EntryCard {
            thumbnail: None,
            title: "x".repeat(200),
            detail: "short".to_string(),
        };
        assert_eq!(
            card.measure(80),
            EntrySize {
                width: 80,
                height: CARD_HEIGHT
            }
        );
        assert_eq!(card.measure(500).width, 200);
    }

    #[test]
    fn navigation_hides_controls_at_bounds() {
        assert_eq!(
            navigation(1, 3),
            NavigationView {
                show_prev: false,
                show_next: true,
                indicator: "Page 1 of 3".to_string()
            }
        );
        let last = navigation(3, 3);
        assert!(last.show_prev);
        assert!(!last.show_next);

        let only = navigation(1, 1);
        assert!(!only.show_prev && !only.show_next);
    }

    #[test]
    fn modal_renders_one_block_per_valid_section_in_order() {
        let doc = SummaryDocument::from_sections([
            Section::new("One", "a", "b"),
            Section::new("Two", "c", "d"),
            Section::new("Three", "e", "f"),
        ]);
        let view = build_modal(
            &doc,
            &DisplayMeta::for_video(&video("dQw4w9WgXcQ", "Title")),
            &VideoId::new("dQw4w9WgXcQ"),
            now(),
        );

        assert_eq!(view.section_count(), 3);
        let headings: Vec<_> = view
            .blocks
            .iter()
            .map(|b| match b {
                ModalBlock::Section { heading, .. } => heading.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(headings, vec!["One", "Two", "Three"]);
        assert_eq!(
            view.subtitle.as_deref(),
            Some("Channel • 2K views • 3 days ago")
        );
        assert_eq!(view.video_url, "https://www.youtube.com/watch?v=dQw4w9WgXcQ");
    }

    #[test]
    fn malformed_section_renders_placeholder_at_its_index() {
        let doc = SummaryDocument::from_value(&json!({
            "sections": [
                { "header": "One", "bullets": ["a", "b"] },
                { "header": "Two" },
                { "header": "Three", "bullets": ["e", "f"] }
            ]
        }));
        let view = build_modal(
            &doc,
            &DisplayMeta::direct("YouTube Video Summary"),
            &VideoId::new("dQw4w9WgXcQ"),
            now(),
        );

        assert_eq!(view.blocks.len(), 3);
        assert_eq!(
            view.blocks[1],
            ModalBlock::Placeholder {
                position: 2,
                message: "Incomplete data for section 2. Unable to display the summary."
                    .to_string()
            }
        );
        assert!(matches!(view.blocks[2], ModalBlock::Section { .. }));
        assert!(view.subtitle.is_none());
    }

    #[test]
    fn missing_section_list_renders_single_notice() {
        let doc = SummaryDocument::from_value(&json!({ "text": "nope" }));
        let view = build_modal(
            &doc,
            &DisplayMeta::direct("x"),
            &VideoId::new("dQw4w9WgXcQ"),
            now(),
        );
        assert_eq!(
            view.blocks,
            vec![ModalBlock::Malformed {
                message: MALFORMED_SUMMARY_MESSAGE.to_string()
            }]
        );
    }

    #[test]
    fn plain_text_serializes_visible_content() {
        let doc = SummaryDocument::from_sections([Section::new("Don&#39;t", "a", "b")]);
        let view = build_modal(
            &doc,
            &DisplayMeta::direct("Title"),
            &VideoId::new("dQw4w9WgXcQ"),
            now(),
        );
        assert_eq!(view.plain_text(), "✨\nTitle\n\nDon't\n• a\n• b");
    }
}
