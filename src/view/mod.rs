//! Derived view over a loaded feed: paging cursor and active filter.
//!
//! Paging always refers to the full entry list. Filtered views are shown
//! whole, on one implicit page, while the page cursor and its controls keep
//! describing the unfiltered list. Moving the cursor leaves any filter.

use crate::domain::{Entry, EntryView, FavoritesSet};

pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    None,
    Favorites,
    /// Lowercased needle matched against title and summary.
    Text(String),
}

impl Filter {
    pub fn text(needle: &str) -> Self {
        Filter::Text(needle.to_lowercase())
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Filter::None)
    }
}

#[derive(Debug)]
pub struct ViewState {
    entries: Vec<Entry>,
    current_page: usize,
    filter: Filter,
}

impl ViewState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            current_page: 1,
            filter: Filter::None,
        }
    }

    /// Replace the whole entry list, returning to page 1 with no filter.
    pub fn load(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
        self.current_page = 1;
        self.filter = Filter::None;
    }

    /// Replace the active filter. Filters never stack.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.current_page = 1;
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn visible_page<'a>(&'a self, favorites: &FavoritesSet) -> Vec<&'a Entry> {
        match &self.filter {
            Filter::None => {
                let start = ((self.current_page - 1) * PAGE_SIZE).min(self.entries.len());
                let end = (start + PAGE_SIZE).min(self.entries.len());
                self.entries[start..end].iter().collect()
            }
            Filter::Favorites => self
                .entries
                .iter()
                .filter(|e| favorites.contains(&e.link))
                .collect(),
            Filter::Text(needle) => self
                .entries
                .iter()
                .filter(|e| e.matches_text(needle))
                .collect(),
        }
    }

    /// Visible entries paired with their favorite flag.
    pub fn project(&self, favorites: &FavoritesSet) -> Vec<EntryView> {
        self.visible_page(favorites)
            .into_iter()
            .map(|e| EntryView::new(e, favorites.contains(&e.link)))
            .collect()
    }

    /// Advance one page and show the unfiltered list.
    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.current_page += 1;
            self.filter = Filter::None;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.can_go_prev() {
            self.current_page -= 1;
            self.filter = Filter::None;
            true
        } else {
            false
        }
    }

    pub fn can_go_next(&self) -> bool {
        self.current_page * PAGE_SIZE < self.entries.len()
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn page_label(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.entries.len().div_ceil(PAGE_SIZE).max(1)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize, title: &str, summary: &str) -> Entry {
        Entry::from_parts(
            Some(title.to_string()),
            Some(format!("https://example.com/{}", i)),
            Some(summary.to_string()),
            None,
            None,
        )
    }

    fn entries(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|i| entry(i, &format!("Story {}", i), "Nothing to see"))
            .collect()
    }

    fn links(visible: &[&Entry]) -> Vec<String> {
        visible.iter().map(|e| e.link.clone()).collect()
    }

    #[test]
    fn test_empty_view_is_inert() {
        let mut view = ViewState::new();
        let favorites = FavoritesSet::new();

        assert_eq!(view.page_label(), 1);
        assert_eq!(view.page_count(), 1);
        assert!(view.visible_page(&favorites).is_empty());
        assert!(!view.can_go_next());
        assert!(!view.can_go_prev());
        assert!(!view.next_page());
        assert!(!view.prev_page());
        assert_eq!(view.page_label(), 1);
    }

    #[test]
    fn test_paging_through_25_entries() {
        let mut view = ViewState::new();
        let favorites = FavoritesSet::new();
        view.load(entries(25));

        assert_eq!(view.page_label(), 1);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.visible_page(&favorites).len(), 10);
        assert!(!view.can_go_prev());
        assert!(view.can_go_next());

        assert!(view.next_page());
        assert!(view.next_page());

        assert_eq!(view.page_label(), 3);
        let visible = view.visible_page(&favorites);
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[0].link, "https://example.com/20");
        assert!(!view.can_go_next());
        assert!(view.can_go_prev());

        assert!(!view.next_page());
        assert_eq!(view.page_label(), 3);
    }

    #[test]
    fn test_can_go_next_boundary() {
        for len in [0, 1, 9, 10, 11, 20, 21] {
            let mut view = ViewState::new();
            view.load(entries(len));
            loop {
                assert_eq!(view.can_go_next(), view.page_label() * PAGE_SIZE < len);
                assert_eq!(view.can_go_prev(), view.page_label() > 1);
                if !view.next_page() {
                    break;
                }
            }
            assert_eq!(view.page_label(), view.page_count());
        }
    }

    #[test]
    fn test_prev_page_stops_at_one() {
        let mut view = ViewState::new();
        view.load(entries(15));
        view.next_page();

        assert!(view.prev_page());
        assert!(!view.prev_page());
        assert_eq!(view.page_label(), 1);
    }

    #[test]
    fn test_load_resets_page_and_filter() {
        let mut view = ViewState::new();
        view.load(entries(30));
        view.next_page();
        view.set_filter(Filter::Favorites);

        view.load(entries(3));
        assert_eq!(view.page_label(), 1);
        assert_eq!(view.filter(), &Filter::None);
        assert_eq!(view.entries().len(), 3);
    }

    #[test]
    fn test_text_filter_shows_every_match() {
        let mut all = entries(25);
        all[2] = entry(2, "Election results", "");
        all[13] = entry(13, "Markets", "Ahead of the ELECTION");
        all[24] = entry(24, "Pre-election polls", "Close race");

        let mut view = ViewState::new();
        let favorites = FavoritesSet::new();
        view.load(all);
        view.next_page();
        view.next_page();

        view.set_filter(Filter::text("election"));
        assert_eq!(view.page_label(), 1);
        let visible = view.visible_page(&favorites);
        assert_eq!(
            links(&visible),
            [
                "https://example.com/2",
                "https://example.com/13",
                "https://example.com/24"
            ]
        );

        // Page controls still describe the unfiltered list, and moving
        // leaves the filter for that page.
        assert!(view.next_page());
        assert_eq!(view.filter(), &Filter::None);
        assert_eq!(view.page_label(), 2);
        let visible = view.visible_page(&favorites);
        assert_eq!(visible.len(), 10);
        assert_eq!(visible[0].link, "https://example.com/10");
    }

    #[test]
    fn test_failed_move_keeps_filter() {
        let mut view = ViewState::new();
        let favorites = FavoritesSet::new();
        view.load(entries(5));
        view.set_filter(Filter::text("story 1"));

        assert!(!view.next_page());
        assert!(!view.prev_page());
        assert_eq!(view.filter(), &Filter::text("story 1"));
        assert_eq!(view.visible_page(&favorites).len(), 1);
    }

    #[test]
    fn test_filters_replace_each_other() {
        let mut all = entries(12);
        all[0] = entry(0, "Weather", "Sunny");
        all[11] = entry(11, "Sports", "Weather delays");

        let mut view = ViewState::new();
        let favorites: FavoritesSet = ["https://example.com/5"].into_iter().collect();
        view.load(all);

        view.set_filter(Filter::text("Weather"));
        assert_eq!(view.visible_page(&favorites).len(), 2);

        view.set_filter(Filter::Favorites);
        assert_eq!(links(&view.visible_page(&favorites)), ["https://example.com/5"]);

        view.set_filter(Filter::None);
        assert_eq!(view.visible_page(&favorites).len(), 10);
    }

    #[test]
    fn test_favorites_filter_shows_all_matches_on_one_page() {
        let mut view = ViewState::new();
        view.load(entries(25));
        let favorites: FavoritesSet = [
            "https://example.com/1",
            "https://example.com/15",
            "https://example.com/24",
            "https://example.com/not-loaded",
        ]
        .into_iter()
        .collect();

        view.set_filter(Filter::Favorites);
        let visible = view.visible_page(&favorites);
        assert_eq!(visible.len(), 3);
        assert_eq!(visible[2].link, "https://example.com/24");
    }

    #[test]
    fn test_duplicate_links_share_favorite_flag() {
        let mut view = ViewState::new();
        view.load(vec![
            entry(1, "First copy", ""),
            entry(1, "Second copy", ""),
            entry(2, "Other", ""),
        ]);
        let favorites: FavoritesSet = ["https://example.com/1"].into_iter().collect();

        let projected = view.project(&favorites);
        assert_eq!(projected.len(), 3);
        assert!(projected[0].is_favorite);
        assert!(projected[1].is_favorite);
        assert!(!projected[2].is_favorite);

        view.set_filter(Filter::Favorites);
        assert_eq!(view.project(&favorites).len(), 2);
    }
}
