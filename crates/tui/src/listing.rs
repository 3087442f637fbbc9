use chrono::{DateTime, Utc};
use vidbrief_core::PageResult;
use vidbrief_core::view::{EntryCard, EntryContent, EntryHandle, ListingEntry, render_listing};

/// Entries currently shown in the listing region.
///
/// Every render pass bumps the generation, so handles held across a
/// re-render stop resolving instead of pointing at a different video.
#[derive(Debug)]
pub struct Listing {
    generation: u64,
    entries: Vec<ListingEntry>,
    hidden: bool,
    selected: usize,
    scroll: usize,
    viewport_width: u16,
}

impl Default for Listing {
    fn default() -> Self {
        Self {
            generation: 0,
            entries: Vec::new(),
            hidden: false,
            selected: 0,
            scroll: 0,
            viewport_width: 80,
        }
    }
}

impl Listing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all entries with `page`, select the first and scroll to top.
    pub fn render(&mut self, page: &PageResult, now: DateTime<Utc>) {
        self.generation += 1;
        self.entries = render_listing(page, self.generation, now);
        self.selected = 0;
        self.scroll_to_top();
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entry(&self, handle: EntryHandle) -> Option<&ListingEntry> {
        if handle.generation() != self.generation {
            return None;
        }
        self.entries.get(handle.index())
    }

    fn entry_mut(&mut self, handle: EntryHandle) -> Option<&mut ListingEntry> {
        if handle.generation() != self.generation {
            return None;
        }
        self.entries.get_mut(handle.index())
    }

    /// Swap the entry's card for a busy indicator of the same size and hand
    /// back the card. `None` when the handle is stale or already busy.
    pub fn swap_busy(&mut self, handle: EntryHandle) -> Option<EntryCard> {
        let width = self.viewport_width;
        let entry = self.entry_mut(handle)?;
        let EntryContent::Card(card) = &entry.content else {
            return None;
        };
        let size = card.measure(width);
        match std::mem::replace(&mut entry.content, EntryContent::Busy(size)) {
            EntryContent::Card(card) => Some(card),
            EntryContent::Busy(_) => None,
        }
    }

    /// Put `card` back into the entry it came from. Returns false when that
    /// entry no longer exists.
    pub fn restore(&mut self, handle: EntryHandle, card: EntryCard) -> bool {
        match self.entry_mut(handle) {
            Some(entry) => {
                entry.content = EntryContent::Card(card);
                true
            }
            None => false,
        }
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    // ── Selection / viewport ───────────────────────────────────────────

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_handle(&self) -> Option<EntryHandle> {
        self.entries.get(self.selected).map(|e| e.handle)
    }

    pub fn handle_at(&self, index: usize) -> Option<EntryHandle> {
        self.entries.get(index).map(|e| e.handle)
    }

    pub fn select(&mut self, index: usize) {
        if index < self.entries.len() {
            self.selected = index;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Keep the selection inside a window of `visible` entries.
    pub fn follow_selection(&mut self, visible: usize) {
        let visible = visible.max(1);
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + visible {
            self.scroll = self.selected + 1 - visible;
        }
    }

    pub fn set_viewport_width(&mut self, width: u16) {
        self.viewport_width = width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidbrief_core::testing;
    use vidbrief_core::view::CARD_HEIGHT;

    fn rendered(count: usize) -> Listing {
        let mut listing = Listing::new();
        listing.render(&testing::page(1, count, 1), Utc::now());
        listing
    }

    #[test]
    fn swap_and_restore_round_trip() {
        let mut listing = rendered(3);
        let handle = listing.handle_at(1).unwrap();
        let original = listing.entry(handle).unwrap().content.clone();

        let card = listing.swap_busy(handle).expect("card");
        match &listing.entry(handle).unwrap().content {
            EntryContent::Busy(size) => assert_eq!(size.height, CARD_HEIGHT),
            EntryContent::Card(_) => panic!("entry should be busy"),
        }
        // Other entries stay cards.
        assert!(matches!(
            listing.entries()[0].content,
            EntryContent::Card(_)
        ));

        assert!(listing.restore(handle, card));
        assert_eq!(listing.entry(handle).unwrap().content, original);
    }

    #[test]
    fn busy_entry_cannot_be_swapped_twice() {
        let mut listing = rendered(2);
        let handle = listing.handle_at(0).unwrap();
        assert!(listing.swap_busy(handle).is_some());
        assert!(listing.swap_busy(handle).is_none());
    }

    #[test]
    fn busy_size_is_bounded_by_viewport() {
        let mut listing = rendered(1);
        listing.set_viewport_width(10);
        let handle = listing.handle_at(0).unwrap();
        listing.swap_busy(handle).unwrap();
        let EntryContent::Busy(size) = listing.entry(handle).unwrap().content else {
            panic!("expected busy entry");
        };
        assert!(size.width <= 10);
    }

    #[test]
    fn handles_from_previous_render_are_stale() {
        let mut listing = rendered(3);
        let handle = listing.handle_at(2).unwrap();
        let card = listing.swap_busy(handle).unwrap();

        listing.render(&testing::page(2, 3, 2), Utc::now());
        assert!(listing.entry(handle).is_none());
        assert!(!listing.restore(handle, card));
        assert!(
            listing
                .entries()
                .iter()
                .all(|e| matches!(e.content, EntryContent::Card(_)))
        );
    }

    #[test]
    fn hidden_region_survives_rerender() {
        let mut listing = rendered(2);
        listing.hide();
        listing.render(&testing::page(2, 2, 2), Utc::now());
        assert!(listing.is_hidden());
        listing.show();
        assert!(!listing.is_hidden());
    }

    #[test]
    fn selection_is_clamped_and_followed() {
        let mut listing = rendered(5);
        for _ in 0..10 {
            listing.select_next();
        }
        assert_eq!(listing.selected_index(), 4);
        listing.follow_selection(2);
        assert_eq!(listing.scroll(), 3);
        listing.select(0);
        listing.follow_selection(2);
        assert_eq!(listing.scroll(), 0);
    }
}
