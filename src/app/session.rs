use crate::app::{Result, TributaryError};
use crate::domain::EntryView;
use crate::fetcher::FetchRetriever;
use crate::normalizer::Normalizer;
use crate::parser::FeedParser;
use crate::presenter::{PageView, Presenter};
use crate::store::{FavoritesStore, Store};
use crate::view::{Filter, ViewState};

/// Owns the loaded feed, the view over it and the favorites, and runs the
/// fetch → parse → normalize pipeline.
///
/// Loads take `&mut self`, so a newer load can never be overwritten by an
/// older one finishing late.
pub struct Session<S: Store> {
    retriever: FetchRetriever,
    parser: FeedParser,
    normalizer: Normalizer,
    view: ViewState,
    favorites: FavoritesStore<S>,
    current_url: Option<String>,
}

impl<S: Store> Session<S> {
    pub fn new(retriever: FetchRetriever, favorites: FavoritesStore<S>) -> Self {
        Self {
            retriever,
            parser: FeedParser::new(),
            normalizer: Normalizer::new(),
            view: ViewState::new(),
            favorites,
            current_url: None,
        }
    }

    /// Fetch, validate and normalize `url`, replacing the loaded entries.
    ///
    /// On any failure the previously loaded entries stay as they were.
    pub async fn load_feed(&mut self, url: &str) -> Result<usize> {
        let url = url.trim();
        if url.is_empty() {
            return Err(TributaryError::EmptyInput("enter an RSS or Atom feed URL"));
        }

        let raw = self.retriever.retrieve(url).await?;
        let doc = self.parser.parse_feed(&raw)?;
        let entries = self.normalizer.normalize(&doc);
        let count = entries.len();

        self.view.load(entries);
        self.current_url = Some(url.to_string());
        tracing::info!("Loaded {} entries from {}", count, url);

        Ok(count)
    }

    /// Fetch the current feed again.
    pub async fn reload(&mut self) -> Result<usize> {
        let url = self
            .current_url
            .clone()
            .ok_or(TributaryError::EmptyInput("no feed has been loaded"))?;
        self.load_feed(&url).await
    }

    pub fn search(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return Err(TributaryError::EmptyInput("enter text to search for"));
        }
        self.view.set_filter(Filter::text(text));
        Ok(())
    }

    pub fn show_favorites(&mut self) {
        self.view.set_filter(Filter::Favorites);
    }

    pub fn show_all(&mut self) {
        self.view.set_filter(Filter::None);
    }

    pub fn next_page(&mut self) -> bool {
        self.view.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.view.prev_page()
    }

    pub fn toggle_favorite(&mut self, link: &str) -> Result<bool> {
        self.favorites.toggle(link)
    }

    /// The visible entry at 1-based `position`, as numbered in listings.
    pub fn entry_at(&self, position: usize) -> Option<EntryView> {
        position
            .checked_sub(1)
            .and_then(|i| self.visible().into_iter().nth(i))
    }

    pub fn visible(&self) -> Vec<EntryView> {
        self.view.project(self.favorites.set())
    }

    pub fn page_view(&self) -> PageView<'_> {
        PageView {
            entries: self.visible(),
            page: self.view.page_label(),
            page_count: self.view.page_count(),
            can_go_prev: self.view.can_go_prev(),
            can_go_next: self.view.can_go_next(),
            filter: self.view.filter(),
        }
    }

    pub fn render(&self, presenter: &mut dyn Presenter) {
        presenter.render(&self.page_view());
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }
}
