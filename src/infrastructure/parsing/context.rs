//! Parsing context for HTML extraction
//!
//! Carries the page identity needed to resolve links and tag results.

use url::Url;

/// Context information for a search result page
#[derive(Debug, Clone)]
pub struct ParseContext {
    /// URL of the page being parsed, used to resolve relative links
    pub page_url: Url,

    /// Human readable keyword the results are tagged with
    pub keyword: String,

    /// 0-based search page number
    pub page_number: u32,
}

impl ParseContext {
    pub fn new(page_url: Url, keyword: impl Into<String>) -> Self {
        Self {
            page_url,
            keyword: keyword.into(),
            page_number: 0,
        }
    }

    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }
}

/// Detail parsing context for vacancy pages
#[derive(Debug, Clone)]
pub struct DetailParseContext {
    /// Vacancy link the page was loaded from (join key)
    pub url: Url,
}

impl DetailParseContext {
    pub fn new(url: Url) -> Self {
        Self { url }
    }
}
