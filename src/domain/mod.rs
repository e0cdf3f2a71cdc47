pub mod entry;
pub mod favorites;

pub use entry::{Entry, EntryView};
pub use favorites::FavoritesSet;
