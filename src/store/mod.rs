pub mod favorites;
pub mod sqlite;

use crate::app::Result;

pub use favorites::FavoritesStore;
pub use sqlite::SqliteStore;

/// A durable string key-value slot.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}
