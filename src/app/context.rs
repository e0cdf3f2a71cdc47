use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, TributaryError};
use crate::app::Session;
use crate::config::Config;
use crate::fetcher::http_fetcher::HttpFetcher;
use crate::fetcher::{FetchRetriever, Fetcher};
use crate::store::{FavoritesStore, SqliteStore};

pub struct AppContext {
    pub config: Config,
    pub store: Arc<SqliteStore>,
    pub fetcher: Arc<dyn Fetcher + Send + Sync>,
}

impl AppContext {
    /// `db_path` overrides the configured database location.
    pub fn new(config: Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path.or_else(|| config.storage.database_path.clone()) {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);

        Ok(Self {
            config,
            store,
            fetcher,
        })
    }

    pub fn in_memory(config: Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(HttpFetcher::new(&config.http)?);

        Ok(Self {
            config,
            store,
            fetcher,
        })
    }

    /// A fresh session with favorites loaded from the store.
    pub fn session(&self) -> Result<Session<SqliteStore>> {
        let retriever = FetchRetriever::new(self.fetcher.clone(), self.config.routes.clone());
        let favorites = FavoritesStore::load(self.store.clone())?;
        Ok(Session::new(retriever, favorites))
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| TributaryError::Config("Could not find data directory".into()))?;
        let tributary_dir = data_dir.join("tributary");
        std::fs::create_dir_all(&tributary_dir)?;
        Ok(tributary_dir.join("tributary.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    #[test]
    fn test_session_sees_stored_favorites() {
        let ctx = AppContext::in_memory(Config::default()).unwrap();
        ctx.store
            .set("favorites", r#"["https://example.com/a"]"#)
            .unwrap();

        let session = ctx.session().unwrap();
        assert!(session.favorites().is_favorite("https://example.com/a"));
    }

    #[test]
    fn test_db_path_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.db");

        let ctx = AppContext::new(Config::default(), Some(path.clone())).unwrap();
        ctx.store.set("favorites", "[]").unwrap();
        assert!(path.exists());
    }
}
