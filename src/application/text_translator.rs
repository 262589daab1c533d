//! Cyrillic-aware text translation
//!
//! Only text containing Cyrillic letters reaches the translation service.
//! Every failure path (timeout, exhausted retries, open circuit) hands back
//! the original text, so translation never loses a row.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info, warn};

use crate::infrastructure::config::TranslationConfig;
use crate::infrastructure::retry_manager::{CircuitBreaker, RetryPolicy};
use crate::infrastructure::translation::{TranslationError, TranslationService};

static CYRILLIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[а-яА-ЯёЁ]").expect("static regex"));

pub fn contains_cyrillic(text: &str) -> bool {
    CYRILLIC.is_match(text)
}

pub struct TextTranslator {
    /// `None` when translation is disabled
    service: Option<Arc<dyn TranslationService>>,
    source_language: String,
    target_language: String,
    timeout: Duration,
    retry_policy: RetryPolicy,
    breaker: CircuitBreaker,
    cache: Mutex<HashMap<String, String>>,
}

impl TextTranslator {
    pub fn new(service: Arc<dyn TranslationService>, config: &TranslationConfig) -> Self {
        Self {
            service: config.enabled.then_some(service),
            source_language: config.source_language.clone(),
            target_language: config.target_language.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
            retry_policy: RetryPolicy::from_config(config),
            breaker: CircuitBreaker::new(config.failure_threshold),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Identity translator
    pub fn disabled() -> Self {
        let config = TranslationConfig::default();
        Self {
            service: None,
            source_language: config.source_language,
            target_language: config.target_language,
            timeout: Duration::from_secs(config.timeout_seconds),
            retry_policy: RetryPolicy::default(),
            breaker: CircuitBreaker::new(0),
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.service.is_some()
    }

    pub fn is_circuit_open(&self) -> bool {
        self.breaker.is_open()
    }

    /// Translate `text` if it contains Cyrillic letters, otherwise return it as is.
    ///
    /// Any failure keeps the original text.
    pub async fn translate(&self, text: &str) -> String {
        match self.try_translate(text).await {
            Ok(translated) => translated,
            Err(e @ TranslationError::CircuitOpen { .. }) => {
                debug!("Keeping '{}': {}", text, e);
                text.to_string()
            }
            Err(e) => {
                warn!("Translation of '{}' failed, keeping original: {}", text, e);
                text.to_string()
            }
        }
    }

    /// Like `translate`, but reports why a Cyrillic text was not translated
    pub async fn try_translate(&self, text: &str) -> Result<String, TranslationError> {
        let Some(service) = self.service.as_deref() else {
            return Ok(text.to_string());
        };
        if !contains_cyrillic(text) {
            return Ok(text.to_string());
        }

        if let Some(cached) = self.cached(text) {
            return Ok(cached);
        }

        if self.breaker.is_open() {
            return Err(TranslationError::CircuitOpen {
                consecutive_failures: self.breaker.consecutive_failures(),
            });
        }

        match self.retry_policy.run(|| self.translate_once(service, text)).await {
            Ok(translated) => {
                self.breaker.record_success();
                debug!("Translated '{}' -> '{}'", text, translated);
                if let Ok(mut cache) = self.cache.lock() {
                    cache.insert(text.to_string(), translated.clone());
                }
                Ok(translated)
            }
            Err(e) => {
                self.breaker.record_failure();
                if self.breaker.is_open() {
                    info!("Translation disabled for the rest of the run");
                }
                Err(e)
            }
        }
    }

    async fn translate_once(&self, service: &dyn TranslationService, text: &str) -> Result<String, TranslationError> {
        let call = service.translate(text, &self.source_language, &self.target_language);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(TranslationError::Timeout {
                seconds: self.timeout.as_secs(),
            }),
        }
    }

    fn cached(&self, text: &str) -> Option<String> {
        self.cache.lock().ok().and_then(|cache| cache.get(text).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{CountingTranslator, FailingTranslator};
    use async_trait::async_trait;

    fn config(failure_threshold: u32) -> TranslationConfig {
        TranslationConfig {
            max_retries: 1,
            retry_base_delay_ms: 1,
            retry_max_delay_ms: 2,
            failure_threshold,
            ..Default::default()
        }
    }

    #[test]
    fn test_cyrillic_detection() {
        assert!(contains_cyrillic("Работа в команде"));
        assert!(contains_cyrillic("ООО Ёлка"));
        assert!(contains_cyrillic("SQL и Python"));
        assert!(!contains_cyrillic("Hello"));
        assert!(!contains_cyrillic(""));
    }

    #[tokio::test]
    async fn test_latin_text_skips_the_service() {
        let service = Arc::new(CountingTranslator::new());
        let translator = TextTranslator::new(service.clone(), &config(5));

        assert_eq!(translator.translate("Hello").await, "Hello");
        assert_eq!(translator.translate("").await, "");
        assert_eq!(service.calls(), 0);
    }

    #[tokio::test]
    async fn test_cyrillic_text_is_translated_once() {
        let service = Arc::new(CountingTranslator::new().with_entry("Работа в команде", "Teamwork"));
        let translator = TextTranslator::new(service.clone(), &config(5));

        assert_eq!(translator.translate("Работа в команде").await, "Teamwork");
        assert_eq!(translator.translate("Работа в команде").await, "Teamwork");
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_returns_original() {
        let service = Arc::new(FailingTranslator::new(TranslationError::HttpStatus { status: 503 }));
        let translator = TextTranslator::new(service.clone(), &config(5));

        assert_eq!(translator.translate("Аналитик").await, "Аналитик");
        // one call plus one retry
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_recoverable_failure_is_not_retried() {
        let service = Arc::new(FailingTranslator::new(TranslationError::HttpStatus { status: 400 }));
        let translator = TextTranslator::new(service.clone(), &config(5));

        assert_eq!(translator.translate("Аналитик").await, "Аналитик");
        assert_eq!(service.calls(), 1);
    }

    #[tokio::test]
    async fn test_circuit_opens_after_consecutive_failures() {
        let service = Arc::new(FailingTranslator::new(TranslationError::Decode {
            message: "bad".to_string(),
        }));
        let translator = TextTranslator::new(service.clone(), &config(2));

        translator.translate("один").await;
        translator.translate("два").await;
        assert!(translator.is_circuit_open());

        assert_eq!(translator.translate("три").await, "три");
        assert_eq!(
            translator.try_translate("четыре").await,
            Err(TranslationError::CircuitOpen { consecutive_failures: 2 })
        );
        assert_eq!(service.calls(), 2);
    }

    #[tokio::test]
    async fn test_disabled_translator_is_identity() {
        let service = Arc::new(CountingTranslator::new());
        let disabled_config = TranslationConfig {
            enabled: false,
            ..config(5)
        };
        let translator = TextTranslator::new(service.clone(), &disabled_config);

        assert!(!translator.is_enabled());
        assert_eq!(translator.translate("Аналитик").await, "Аналитик");
        assert_eq!(TextTranslator::disabled().translate("Аналитик").await, "Аналитик");
        assert_eq!(service.calls(), 0);
    }

    struct SlowTranslator;

    #[async_trait]
    impl TranslationService for SlowTranslator {
        async fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, TranslationError> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(format!("late {text}"))
        }
    }

    #[tokio::test]
    async fn test_slow_service_times_out() {
        let translator = TextTranslator::new(Arc::new(SlowTranslator), &config(5))
            .with_timeout(Duration::from_millis(10))
            .with_retry_policy(RetryPolicy::new(0, Duration::from_millis(1), Duration::from_millis(1)));

        assert_eq!(translator.translate("Аналитик").await, "Аналитик");
    }
}
