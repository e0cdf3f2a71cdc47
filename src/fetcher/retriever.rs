use std::sync::Arc;

use crate::app::{Result, TributaryError};
use crate::fetcher::{Fetcher, Route};

/// Fetches feed text through an ordered list of routes, falling through
/// to the next route on any failure.
pub struct FetchRetriever {
    fetcher: Arc<dyn Fetcher + Send + Sync>,
    routes: Vec<Route>,
}

impl FetchRetriever {
    pub fn new(fetcher: Arc<dyn Fetcher + Send + Sync>, routes: Vec<Route>) -> Self {
        Self { fetcher, routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Try each route once, in order, and return the first well-formed payload.
    pub async fn retrieve(&self, url: &str) -> Result<String> {
        for route in &self.routes {
            let request_url = route.request_url(url);
            tracing::debug!("Trying route {}: {}", route.name, request_url);

            match self.attempt(route, &request_url).await {
                Ok(content) => {
                    tracing::info!(
                        "Fetched {} via {} ({} bytes)",
                        url,
                        route.name,
                        content.len()
                    );
                    return Ok(content);
                }
                Err(e) => {
                    tracing::warn!("Route {} failed for {}: {}", route.name, url, e);
                }
            }
        }

        Err(TributaryError::FetchExhausted {
            url: url.to_string(),
            attempts: self.routes.len(),
        })
    }

    async fn attempt(&self, route: &Route, request_url: &str) -> Result<String> {
        let body = self.fetcher.get(request_url).await?;
        route.extract(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::testing::ScriptedFetcher;
    use crate::fetcher::Envelope;

    fn routes(n: usize) -> Vec<Route> {
        (0..n)
            .map(|i| {
                Route::new(
                    format!("route-{}", i),
                    format!("https://proxy{}.test/?u={{url}}", i),
                    Envelope::Raw,
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_first_route_success_short_circuits() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(b"<feed/>".to_vec())]));
        let retriever = FetchRetriever::new(fetcher.clone(), routes(3));

        let content = retriever.retrieve("https://example.com/feed").await.unwrap();
        assert_eq!(content, "<feed/>");
        assert_eq!(fetcher.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_falls_through_failures_in_order() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Err(TributaryError::Other("503".into())),
            Err(TributaryError::Other("timeout".into())),
            Ok(b"<rss/>".to_vec()),
        ]));
        let retriever = FetchRetriever::new(fetcher.clone(), routes(4));

        let content = retriever.retrieve("https://example.com/feed").await.unwrap();
        assert_eq!(content, "<rss/>");

        let calls = fetcher.calls();
        assert_eq!(calls.len(), 3);
        assert!(calls[0].starts_with("https://proxy0.test/"));
        assert!(calls[1].starts_with("https://proxy1.test/"));
        assert!(calls[2].starts_with("https://proxy2.test/"));
    }

    #[tokio::test]
    async fn test_malformed_envelope_advances() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Ok(b"not json".to_vec()),
            Ok(br#"{"contents":"<feed/>"}"#.to_vec()),
        ]));
        let json = Envelope::Json {
            field: "contents".into(),
        };
        let retriever = FetchRetriever::new(
            fetcher.clone(),
            vec![
                Route::new("a", "https://a.test/?u={url}", json.clone()),
                Route::new("b", "https://b.test/?u={url}", json),
            ],
        );

        let content = retriever.retrieve("https://example.com/feed").await.unwrap();
        assert_eq!(content, "<feed/>");
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_all_routes_fail_reports_exhausted() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![
            Err(TributaryError::Other("a".into())),
            Err(TributaryError::Other("b".into())),
        ]));
        let retriever = FetchRetriever::new(fetcher.clone(), routes(2));

        let err = retriever.retrieve("https://example.com/feed").await.unwrap_err();
        match err {
            TributaryError::FetchExhausted { url, attempts } => {
                assert_eq!(url, "https://example.com/feed");
                assert_eq!(attempts, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(fetcher.calls().len(), 2);
    }

    #[test]
    fn test_retrieve_blocking() {
        let fetcher = Arc::new(ScriptedFetcher::new(vec![Ok(b"x".to_vec())]));
        let retriever = FetchRetriever::new(fetcher, routes(1));
        let content = tokio_test::block_on(retriever.retrieve("https://example.com")).unwrap();
        assert_eq!(content, "x");
    }
}
