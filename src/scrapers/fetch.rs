//! Network fetch primitive used by every scraper.
//!
//! Scrapers never talk to `reqwest` directly; they go through [`PageFetcher`]
//! so tests can serve fixture HTML from memory.

use super::ExtractError;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Browser-like user agent. Some of the saint sites refuse requests without one.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches a page body as text.
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body of a 2xx response.
    fn get(&self, url: &str) -> impl Future<Output = Result<String, ExtractError>> + Send;
}

/// [`PageFetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client with a fixed user agent and timeout.
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .use_rustls_tls()
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn get(&self, url: &str) -> Result<String, ExtractError> {
        let t0 = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExtractError::network(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::network(url, e))?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(BROWSER_USER_AGENT, DEFAULT_TIMEOUT).is_ok());
    }

    #[test]
    fn test_user_agent_looks_like_a_browser() {
        assert!(BROWSER_USER_AGENT.starts_with("Mozilla/5.0"));
    }

    #[tokio::test]
    async fn test_static_pages_serves_and_records() {
        let pages = testing::StaticPages::new().with_page("https://a.test/", "<p>hi</p>");

        assert_eq!(pages.get("https://a.test/").await.unwrap(), "<p>hi</p>");
        let missing = pages.get("https://a.test/missing").await.unwrap_err();
        assert!(matches!(missing, ExtractError::Status { status: 404, .. }));
        assert_eq!(pages.requests().len(), 2);
    }
}
