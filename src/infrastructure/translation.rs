//! Translation collaborator
//!
//! `TranslationService` is the seam to whatever translates text; the
//! shipped implementation talks to the public Google Translate endpoint.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;

use super::config::TranslationConfig;
use super::retry_manager::RetryableError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Translation timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Translation service returned status {status}")]
    HttpStatus { status: u16 },

    #[error("Translation request failed: {message}")]
    Request { message: String },

    #[error("Unexpected translation response: {message}")]
    Decode { message: String },

    #[error("Translation circuit open after {consecutive_failures} consecutive failures")]
    CircuitOpen { consecutive_failures: u32 },
}

impl RetryableError for TranslationError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::Request { .. } => true,
            Self::HttpStatus { status } => *status == 429 || *status >= 500,
            Self::Decode { .. } | Self::CircuitOpen { .. } => false,
        }
    }
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError>;
}

/// Google Translate `translate_a/single` client
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    timeout_seconds: u64,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create translation HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn request_error(&self, error: &reqwest::Error) -> TranslationError {
        if error.is_timeout() {
            TranslationError::Timeout {
                seconds: self.timeout_seconds,
            }
        } else {
            TranslationError::Request {
                message: error.to_string(),
            }
        }
    }
}

#[async_trait]
impl TranslationService for GoogleTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String, TranslationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t"), ("q", text)])
            .send()
            .await
            .map_err(|e| self.request_error(&e))?;

        if !response.status().is_success() {
            return Err(TranslationError::HttpStatus {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| TranslationError::Decode {
            message: e.to_string(),
        })?;

        parse_translation_response(&body)
    }
}

/// The response is `[[["translated", "source", ...], ...], ...]`; long input
/// comes back split into several segments.
pub fn parse_translation_response(body: &Value) -> Result<String, TranslationError> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::Decode {
            message: "missing segment list".to_string(),
        })?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::Decode {
            message: "empty translation".to_string(),
        });
    }

    Ok(translated)
}
