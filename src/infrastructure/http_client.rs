//! HTTP client for web crawling with rate limiting and error handling
//!
//! Stands in for the fixed sleeps of a browser session: requests are
//! throttled by a token bucket and bounded by an explicit timeout.

use std::num::NonZeroU32;
use std::time::Duration;

use anyhow::{Context, Result};
use governor::{clock::DefaultClock, state::{direct::NotKeyed, InMemoryState}, Quota, RateLimiter};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, USER_AGENT},
    Client,
};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use url::Url;

use super::browser::NavigationError;
use super::config::defaults;

/// HTTP client configuration for crawling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub user_agent: String,
    pub accept_language: String,
    pub timeout_seconds: u64,
    pub max_requests_per_second: u32,
    pub follow_redirects: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::USER_AGENT.to_string(),
            accept_language: defaults::ACCEPT_LANGUAGE.to_string(),
            timeout_seconds: defaults::REQUEST_TIMEOUT_SECONDS,
            max_requests_per_second: defaults::MAX_REQUESTS_PER_SECOND,
            follow_redirects: true,
        }
    }
}

/// HTTP client with rate limiting for respectful crawling
pub struct HttpClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).context("Invalid user agent")?,
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_str(&config.accept_language).context("Invalid accept-language")?,
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .cookie_store(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(10)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.max_requests_per_second).context("Rate limit must be greater than 0")?,
        );
        let rate_limiter = RateLimiter::direct(quota);

        Ok(Self {
            client,
            rate_limiter,
            config,
        })
    }

    /// Fetch URL and return text content with cancellation support
    pub async fn get_text_with_cancellation(
        &self,
        url: &Url,
        cancellation_token: &CancellationToken,
    ) -> Result<String, NavigationError> {
        let cancelled = || NavigationError::Cancelled { url: url.to_string() };

        if cancellation_token.is_cancelled() {
            return Err(cancelled());
        }

        tokio::select! {
            _ = self.rate_limiter.until_ready() => {},
            _ = cancellation_token.cancelled() => return Err(cancelled()),
        }

        tracing::debug!("Fetching HTML from: {}", url);

        let response = tokio::select! {
            result = self.client.get(url.clone()).send() => result.map_err(|e| self.request_error(url, &e))?,
            _ = cancellation_token.cancelled() => {
                tracing::warn!("🛑 HTTP request cancelled for URL: {}", url);
                return Err(cancelled());
            }
        };

        if !response.status().is_success() {
            return Err(NavigationError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let text = tokio::select! {
            result = response.text() => result.map_err(|e| self.request_error(url, &e))?,
            _ = cancellation_token.cancelled() => {
                tracing::warn!("🛑 Response reading cancelled for URL: {}", url);
                return Err(cancelled());
            }
        };

        tracing::debug!("Successfully fetched: {} ({} chars)", url, text.len());
        Ok(text)
    }

    fn request_error(&self, url: &Url, error: &reqwest::Error) -> NavigationError {
        if error.is_timeout() {
            NavigationError::Timeout {
                url: url.to_string(),
                seconds: self.config.timeout_seconds,
            }
        } else {
            NavigationError::Request {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_creation() {
        let client = HttpClient::new(HttpClientConfig::default());
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_zero_rate_limit_is_rejected() {
        let config = HttpClientConfig {
            max_requests_per_second: 0,
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_err());
    }

    #[tokio::test]
    async fn test_invalid_user_agent_is_rejected() {
        let config = HttpClientConfig {
            user_agent: "bad\nagent".to_string(),
            ..Default::default()
        };
        assert!(HttpClient::new(config).is_err());
    }
}
