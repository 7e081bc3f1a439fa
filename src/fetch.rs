//! Page retrieval.
//!
//! The scrapers only need "give me the HTML at this URL", so retrieval sits
//! behind the [`FetchPage`] trait:
//! - [`HttpFetcher`]: the real client, a shared `reqwest::Client`
//! - tests substitute an in-memory map of URL to HTML
//!
//! Requests are plain GETs with reqwest's default redirect policy. There is
//! no timeout or retry; a failed request is reported to the caller.

use std::error::Error;
use tracing::{debug, instrument};

/// Trait for retrieving a page body by URL.
pub trait FetchPage {
    /// Fetch `url` and return the response body as text.
    ///
    /// Non-success HTTP statuses are errors.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`FetchPage`] backed by a reqwest client.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a client that identifies itself with the crate name and version.
    ///
    /// Wikipedia refuses requests that carry no `User-Agent`.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;
        Ok(Self { client })
    }
}

impl FetchPage for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched page");
        Ok(body)
    }
}


#[cfg(test)]
mod tests {
    use super::testing::StaticPages;
    use super::*;

    #[tokio::test]
    async fn test_static_pages_serve_known_urls() {
        let pages = StaticPages::default().with_page("https://example.org/a", "<p>a</p>");
        assert_eq!(pages.fetch("https://example.org/a").await.unwrap(), "<p>a</p>");
        assert!(pages.fetch("https://example.org/b").await.is_err());
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }
}
