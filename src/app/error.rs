use thiserror::Error;

#[derive(Error, Debug)]
pub enum TributaryError {
    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Could not fetch {url}: all {attempts} routes failed")]
    FetchExhausted { url: String, attempts: usize },

    #[error("Feed parsing error: {0}")]
    ParseFailure(String),

    #[error("Document is not an RSS or Atom feed")]
    InvalidFeedFormat,

    #[error("Malformed response envelope: {0}")]
    Envelope(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TributaryError>;
