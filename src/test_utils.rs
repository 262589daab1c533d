//! Test doubles for the `Browser` and `TranslationService` seams

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::infrastructure::browser::{Browser, NavigationError, Page};
use crate::infrastructure::translation::{TranslationError, TranslationService};

/// Serves canned HTML by exact URL; anything else is a 404
#[derive(Default)]
pub struct FakeBrowser {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn load_count(&self) -> usize {
        self.requested().len()
    }
}

#[async_trait]
impl Browser for FakeBrowser {
    async fn load(&self, url: &Url) -> Result<Page, NavigationError> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(url.to_string());
        }
        self.pages
            .get(url.as_str())
            .map(|html| Page::new(url.clone(), html.as_str()))
            .ok_or_else(|| NavigationError::HttpStatus {
                status: 404,
                url: url.to_string(),
            })
    }
}

/// Looks text up in a dictionary, otherwise prefixes it with `[en] `
#[derive(Default)]
pub struct CountingTranslator {
    dictionary: HashMap<String, String>,
    calls: AtomicUsize,
}

impl CountingTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, source: &str, translated: &str) -> Self {
        self.dictionary.insert(source.to_string(), translated.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationService for CountingTranslator {
    async fn translate(&self, text: &str, _source: &str, _target: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .dictionary
            .get(text)
            .cloned()
            .unwrap_or_else(|| format!("[en] {text}")))
    }
}

/// Fails every call with the same error
pub struct FailingTranslator {
    error: TranslationError,
    calls: AtomicUsize,
}

impl FailingTranslator {
    pub fn new(error: TranslationError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationService for FailingTranslator {
    async fn translate(&self, _text: &str, _source: &str, _target: &str) -> Result<String, TranslationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}
