//! Page loading collaborator
//!
//! Extractors only need "render this URL and let me query it with CSS
//! selectors". `Browser` is that seam; `HttpBrowser` serves it over plain
//! HTTP, which is enough for hh.ru's server-rendered markup.

use async_trait::async_trait;
use scraper::Html;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

use super::http_client::HttpClient;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Invalid job link '{link}': {reason}")]
    InvalidLink { link: String, reason: String },

    #[error("HTTP request failed with status {status}: {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    #[error("Navigation to {url} cancelled")]
    Cancelled { url: String },
}

impl NavigationError {
    pub fn invalid_link(link: &str, reason: impl Into<String>) -> Self {
        Self::InvalidLink {
            link: link.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// A loaded page: final URL plus its markup
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub html: String,
}

impl Page {
    pub fn new(url: Url, html: impl Into<String>) -> Self {
        Self { url, html: html.into() }
    }

    /// Parsed DOM for selector queries. `Html` is not `Send`, so parse
    /// right before querying and never hold it across an await.
    pub fn document(&self) -> Html {
        Html::parse_document(&self.html)
    }
}

#[async_trait]
pub trait Browser: Send + Sync {
    async fn load(&self, url: &Url) -> Result<Page, NavigationError>;
}

/// HTTP-backed browser with run-level cancellation
pub struct HttpBrowser {
    client: HttpClient,
    cancellation_token: CancellationToken,
}

impl HttpBrowser {
    pub fn new(client: HttpClient, cancellation_token: CancellationToken) -> Self {
        Self {
            client,
            cancellation_token,
        }
    }
}

#[async_trait]
impl Browser for HttpBrowser {
    async fn load(&self, url: &Url) -> Result<Page, NavigationError> {
        let html = self
            .client
            .get_text_with_cancellation(url, &self.cancellation_token)
            .await?;
        Ok(Page::new(url.clone(), html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::http_client::HttpClientConfig;
    use scraper::Selector;

    #[test]
    fn test_page_document_is_queryable() {
        let page = Page::new(
            Url::parse("https://hh.ru/vacancy/1").unwrap(),
            "<html><body><h1>Rust developer</h1></body></html>",
        );
        let document = page.document();
        let selector = Selector::parse("h1").unwrap();
        assert_eq!(document.select(&selector).count(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_browser_does_not_navigate() {
        let token = CancellationToken::new();
        token.cancel();
        let browser = HttpBrowser::new(HttpClient::new(HttpClientConfig::default()).unwrap(), token);

        let err = browser
            .load(&Url::parse("https://hh.ru/vacancy/1").unwrap())
            .await
            .unwrap_err();
        assert!(err.is_cancelled());
    }
}
