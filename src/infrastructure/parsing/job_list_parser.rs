//! Search result page parser
//!
//! Extracts one `JobSummary` per listing. A listing with a missing required
//! node is logged and skipped; its siblings are still extracted.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use super::config::JobListSelectors;
use super::{compile_selectors, element_text, first_text, ContextualParser, ParseContext, ParsingError, ParsingResult};
use crate::domain::JobSummary;

/// Parser for extracting job summaries from search result pages
pub struct JobListParser {
    container_selectors: Vec<Selector>,
    title_selectors: Vec<Selector>,
    employer_selectors: Vec<Selector>,
    location_selectors: Vec<Selector>,
    link_selectors: Vec<Selector>,
}

impl JobListParser {
    /// Create a new parser with the default hh.ru selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&JobListSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &JobListSelectors) -> ParsingResult<Self> {
        Ok(Self {
            container_selectors: compile_selectors(&selectors.listing_container)?,
            title_selectors: compile_selectors(&selectors.title)?,
            employer_selectors: compile_selectors(&selectors.employer)?,
            location_selectors: compile_selectors(&selectors.location)?,
            link_selectors: compile_selectors(&selectors.link)?,
        })
    }
}

impl ContextualParser for JobListParser {
    type Output = Vec<JobSummary>;
    type Context = ParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing job list for '{}' page {}", context.keyword, context.page_number);

        // First container selector that matches anything wins
        let Some((selector_index, listings)) = self
            .container_selectors
            .iter()
            .enumerate()
            .map(|(i, selector)| (i, html.select(selector).collect::<Vec<_>>()))
            .find(|(_, elements)| !elements.is_empty())
        else {
            info!(
                "No listings on page {} for '{}' ({})",
                context.page_number, context.keyword, context.page_url
            );
            return Ok(Vec::new());
        };

        debug!("Found {} listings using container selector {}", listings.len(), selector_index);

        let mut summaries = Vec::with_capacity(listings.len());
        for (index, listing) in listings.iter().enumerate() {
            match self.extract_summary(*listing, context) {
                Ok(summary) => summaries.push(summary),
                Err(e) if !e.is_recoverable() => return Err(e),
                Err(e) => {
                    warn!(
                        "Skipping listing {} on page {} for '{}': {}",
                        index, context.page_number, context.keyword, e
                    );
                }
            }
        }

        debug!(
            "Extracted {}/{} listings from page {}",
            summaries.len(),
            listings.len(),
            context.page_number
        );

        Ok(summaries)
    }
}

impl JobListParser {
    /// Extract one listing; every field except the employer is required
    fn extract_summary(&self, listing: ElementRef<'_>, context: &ParseContext) -> ParsingResult<JobSummary> {
        let root = std::iter::once(listing);

        let title = first_text(root.clone(), &self.title_selectors)
            .ok_or_else(|| ParsingError::required_field_missing("title", Some("job listing")))?;

        // Employer names are split over several spans on hh.ru ("ООО", "Ромашка")
        let company = self
            .employer_selectors
            .iter()
            .map(|selector| {
                listing
                    .select(selector)
                    .map(|element| element_text(&element))
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
            })
            .find(|parts| !parts.is_empty())
            .unwrap_or_default()
            .join(" ");

        let location = first_text(root, &self.location_selectors)
            .ok_or_else(|| ParsingError::required_field_missing("location", Some("job listing")))?;

        let link = self.extract_link(listing, &context.page_url)?;

        Ok(JobSummary {
            title,
            company,
            location,
            link,
            keyword: context.keyword.clone(),
        })
    }

    fn extract_link(&self, listing: ElementRef<'_>, page_url: &Url) -> ParsingResult<Url> {
        let href = self
            .link_selectors
            .iter()
            .find_map(|selector| {
                listing
                    .select(selector)
                    .find_map(|anchor| anchor.value().attr("href"))
            })
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| ParsingError::required_field_missing("link", Some("job listing")))?;

        resolve_url(href, page_url)
    }
}

/// Resolve a possibly relative `href` against the page it was found on.
///
/// Only absolute http(s) results are accepted.
pub fn resolve_url(href: &str, page_url: &Url) -> ParsingResult<Url> {
    let resolved = page_url
        .join(href)
        .map_err(|e| ParsingError::url_resolution_failed(href, e.to_string(), Some(page_url.as_str())))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        scheme => Err(ParsingError::url_resolution_failed(
            href,
            format!("unsupported scheme '{scheme}'"),
            Some(page_url.as_str()),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEARCH_PAGE: &str = r#"
        <html><body>
          <div class="vacancy-info--umZA61PpMY07JVJtomBA">
            <h2 class="bloko-header-section-2"><a href="https://hh.ru/vacancy/101?query=rust">
              <span data-qa="serp-item__title-text">Backend developer</span></a></h2>
            <span data-qa="vacancy-serp__vacancy-employer-text">ООО</span>
            <span data-qa="vacancy-serp__vacancy-employer-text">Uzum&nbsp;Market</span>
            <span data-qa="vacancy-serp__vacancy-address">Ташкент</span>
          </div>
          <div class="vacancy-info--umZA61PpMY07JVJtomBA">
            <h2 class="bloko-header-section-2"><a href="/vacancy/102">
              <span data-qa="wrong-title">no title here</span></a></h2>
            <span data-qa="vacancy-serp__vacancy-address">Самарканд</span>
          </div>
          <div class="vacancy-info--umZA61PpMY07JVJtomBA">
            <h2 class="bloko-header-section-2"><a href="/vacancy/103">
              <span data-qa="serp-item__title-text">Data analyst</span></a></h2>
            <span data-qa="vacancy-serp__vacancy-address">Ташкент</span>
          </div>
        </body></html>
    "#;

    fn context() -> ParseContext {
        ParseContext::new(
            Url::parse("https://hh.ru/search/vacancy?text=Backend+developer&page=0").unwrap(),
            "Backend developer",
        )
    }

    #[test]
    fn test_parser_creation() {
        assert!(JobListParser::new().is_ok());
    }

    #[test]
    fn test_missing_title_skips_only_that_listing() {
        let parser = JobListParser::new().unwrap();
        let html = Html::parse_document(SEARCH_PAGE);

        let summaries = parser.parse_with_context(&html, &context()).unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Backend developer");
        assert_eq!(summaries[1].title, "Data analyst");
    }

    #[test]
    fn test_employer_parts_are_joined_with_nbsp_collapsed() {
        let parser = JobListParser::new().unwrap();
        let html = Html::parse_document(SEARCH_PAGE);

        let summaries = parser.parse_with_context(&html, &context()).unwrap();

        assert_eq!(summaries[0].company, "ООО Uzum Market");
        assert_eq!(summaries[0].location, "Ташкент");
        assert_eq!(summaries[0].keyword, "Backend developer");
        // No employer node is not an error, just an empty company
        assert_eq!(summaries[1].company, "");
    }

    #[test]
    fn test_relative_links_are_resolved() {
        let parser = JobListParser::new().unwrap();
        let html = Html::parse_document(SEARCH_PAGE);

        let summaries = parser.parse_with_context(&html, &context()).unwrap();

        assert_eq!(summaries[0].link.as_str(), "https://hh.ru/vacancy/101?query=rust");
        assert_eq!(summaries[1].link.as_str(), "https://hh.ru/vacancy/103");
    }

    #[test]
    fn test_empty_page_yields_no_summaries() {
        let parser = JobListParser::new().unwrap();
        let html = Html::parse_document("<html><body><p>Ничего не найдено</p></body></html>");

        assert!(parser.parse_with_context(&html, &context()).unwrap().is_empty());
    }

    #[test]
    fn test_url_resolution() {
        let base = Url::parse("https://hh.ru/search/vacancy?text=x").unwrap();

        assert_eq!(
            resolve_url("/vacancy/123", &base).unwrap().as_str(),
            "https://hh.ru/vacancy/123"
        );
        assert_eq!(
            resolve_url("https://tashkent.hh.uz/vacancy/9", &base).unwrap().as_str(),
            "https://tashkent.hh.uz/vacancy/9"
        );
        assert!(resolve_url("javascript:void(0)", &base).is_err());
        assert!(resolve_url("mailto:hr@example.com", &base).is_err());
    }
}
