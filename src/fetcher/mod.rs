pub mod http_fetcher;
pub mod retriever;
pub mod route;

use async_trait::async_trait;

use crate::app::Result;

pub use retriever::FetchRetriever;
pub use route::{Envelope, Route};

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the body. Non-success statuses are errors.
    async fn get(&self, url: &str) -> Result<Vec<u8>>;
}
