//! Search result page → job summaries

use std::sync::Arc;

use tracing::debug;
use url::Url;

use super::error::ExtractionError;
use crate::domain::JobSummary;
use crate::infrastructure::browser::Browser;
use crate::infrastructure::parsing::{ContextualParser, JobListParser, ParseContext};

pub struct PageExtractor {
    browser: Arc<dyn Browser>,
    parser: JobListParser,
}

impl PageExtractor {
    pub fn new(browser: Arc<dyn Browser>, parser: JobListParser) -> Self {
        Self { browser, parser }
    }

    /// Load one search page and extract its listings tagged with `keyword`.
    ///
    /// Broken listings are skipped by the parser; only a failed load or an
    /// unusable page is an error.
    pub async fn extract(&self, url: &Url, keyword: &str, page_number: u32) -> Result<Vec<JobSummary>, ExtractionError> {
        let page = self.browser.load(url).await?;

        let context = ParseContext::new(page.url.clone(), keyword).with_page_number(page_number);
        let summaries = self.parser.parse_with_context(&page.document(), &context)?;

        debug!("Page {} for '{}' yielded {} listings", page_number, keyword, summaries.len());
        Ok(summaries)
    }
}
