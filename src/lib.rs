//! # Tributary
//!
//! Fetch an RSS/Atom feed through a list of fallback proxies and browse it
//! page by page, with search and persistent favorites.
//!
//! ## Architecture
//!
//! ```text
//! Routes → Parser → Normalizer → ViewState → Presenter
//!                                    ↑
//!                              FavoritesStore
//! ```
//!
//! - [`fetcher`]: ordered route fallback over an HTTP client
//! - [`parser`]: markup tree and the feed heuristic
//! - [`normalizer`]: RSS/Atom nodes to [`Entry`](domain::Entry)
//! - [`view`]: paging and filtering
//! - [`store`]: SQLite-backed favorites
//!
//! ## Quick Start
//!
//! ```bash
//! # Print the first page
//! tributary show https://blog.rust-lang.org/feed.xml
//!
//! # Search it
//! tributary show https://blog.rust-lang.org/feed.xml --search release
//!
//! # Browse interactively
//! tributary browse https://blog.rust-lang.org/feed.xml
//! ```

/// Application context, session controller and error handling.
///
/// [`Session`](app::Session) owns the loaded entries, the view over them
/// and the favorites; [`AppContext`](app::AppContext) builds sessions from
/// configuration.
pub mod app;

/// Command-line interface using clap.
///
/// - `show <url>` - Print one page, a search or the favorites
/// - `browse <url>` - Interactive command loop
/// - `favorites` - List favorite links
/// - `toggle <link>` - Star or unstar a link
pub mod cli;

/// Configuration loaded from `~/.config/tributary/config.toml`:
/// routes, HTTP client settings, storage path and browse commands.
pub mod config;

/// Core domain models.
///
/// - [`Entry`](domain::Entry): a normalized feed entry
/// - [`EntryView`](domain::EntryView): an entry plus its favorite flag
/// - [`FavoritesSet`](domain::FavoritesSet): favorite links
pub mod domain;

/// Feed retrieval through ordered fallback routes.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for plain GETs
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`FetchRetriever`](fetcher::FetchRetriever): tries each route once, in order
pub mod fetcher;

/// Feed normalization.
///
/// Extracts title, link, summary, date and image from Atom `<entry>` or
/// RSS `<item>` nodes, with fallbacks for anything missing.
pub mod normalizer;

/// Markup parsing into a [`FeedDocument`](parser::FeedDocument) tree.
pub mod parser;

/// Rendering boundary: the [`Presenter`](presenter::Presenter) trait plus
/// text and JSON implementations.
pub mod presenter;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): key-value storage trait
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`FavoritesStore`](store::FavoritesStore): persisted favorites
pub mod store;

/// Paging and filtering over the loaded entries.
pub mod view;

pub use app::{Result, TributaryError};
