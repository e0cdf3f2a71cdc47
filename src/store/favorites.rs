use std::sync::Arc;

use crate::app::Result;
use crate::domain::FavoritesSet;
use crate::store::Store;

/// Key under which the serialized favorites list is stored.
pub const FAVORITES_KEY: &str = "favorites";

/// Favorite links, loaded once and written back whole on every toggle.
pub struct FavoritesStore<S: Store> {
    store: Arc<S>,
    set: FavoritesSet,
}

impl<S: Store> FavoritesStore<S> {
    /// Read the persisted set. A missing or unreadable value yields an
    /// empty set rather than an error.
    pub fn load(store: Arc<S>) -> Result<Self> {
        let set = match store.get(FAVORITES_KEY)? {
            None => FavoritesSet::new(),
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed favorites value: {}", e);
                FavoritesSet::new()
            }),
        };

        tracing::debug!("Loaded {} favorites", set.len());
        Ok(Self { store, set })
    }

    pub fn is_favorite(&self, link: &str) -> bool {
        self.set.contains(link)
    }

    /// Flip membership of `link` and persist. Returns the new membership.
    ///
    /// If the write fails the in-memory set is left as it was.
    pub fn toggle(&mut self, link: &str) -> Result<bool> {
        let is_favorite = self.set.toggle(link);

        if let Err(e) = self.persist() {
            self.set.toggle(link);
            return Err(e);
        }

        Ok(is_favorite)
    }

    pub fn set(&self) -> &FavoritesSet {
        &self.set
    }

    pub fn links(&self) -> Vec<String> {
        self.set.iter().map(String::from).collect()
    }

    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.set)?;
        self.store.set(FAVORITES_KEY, &raw)
    }
}
