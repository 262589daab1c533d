//! Vacancy link → job detail

use std::sync::Arc;

use tracing::debug;
use url::Url;

use super::error::ExtractionError;
use crate::domain::JobDetail;
use crate::infrastructure::browser::{Browser, NavigationError};
use crate::infrastructure::parsing::{ContextualParser, DetailParseContext, JobDetailParser};

pub struct DetailExtractor {
    browser: Arc<dyn Browser>,
    parser: JobDetailParser,
}

impl DetailExtractor {
    pub fn new(browser: Arc<dyn Browser>, parser: JobDetailParser) -> Self {
        Self { browser, parser }
    }

    /// Load a vacancy page and extract its details.
    ///
    /// Links that are not absolute http(s) URLs are rejected before any
    /// navigation happens.
    pub async fn extract(&self, link: &str) -> Result<JobDetail, ExtractionError> {
        let url = validate_link(link)?;
        let page = self.browser.load(&url).await?;

        let context = DetailParseContext::new(url);
        let detail = self.parser.parse_with_context(&page.document(), &context)?;

        debug!("Extracted {} skills from {}", detail.skills.len(), link);
        Ok(detail)
    }
}

pub fn validate_link(link: &str) -> Result<Url, NavigationError> {
    let url = Url::parse(link.trim()).map_err(|e| NavigationError::invalid_link(link, e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(NavigationError::invalid_link(link, format!("unsupported scheme '{scheme}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::FakeBrowser;

    const LINK: &str = "https://hh.ru/vacancy/7";

    fn extractor(browser: Arc<FakeBrowser>) -> DetailExtractor {
        DetailExtractor::new(browser, JobDetailParser::new().unwrap())
    }

    #[tokio::test]
    async fn test_extracts_detail() {
        let browser = Arc::new(FakeBrowser::new().with_page(
            LINK,
            r#"<html><body>
                 <span data-qa="vacancy-experience">1–3 года</span>
                 <li data-qa="skills-element">Rust</li>
                 <li data-qa="skills-element">Tokio</li>
               </body></html>"#,
        ));

        let detail = extractor(browser).extract(LINK).await.unwrap();

        assert_eq!(detail.required_experience, "1–3 года");
        assert_eq!(detail.skills, vec!["Rust", "Tokio"]);
        assert_eq!(detail.salary, None);
        assert_eq!(detail.link.as_str(), LINK);
    }

    #[tokio::test]
    async fn test_missing_experience_yields_no_detail() {
        let browser = Arc::new(FakeBrowser::new().with_page(
            LINK,
            r#"<html><body><li data-qa="skills-element">Rust</li></body></html>"#,
        ));

        let err = extractor(browser).extract(LINK).await.unwrap_err();

        assert!(matches!(err, ExtractionError::Parsing(_)));
    }

    #[tokio::test]
    async fn test_invalid_links_do_not_navigate() {
        let browser = Arc::new(FakeBrowser::new());
        let extractor = extractor(browser.clone());

        for link in ["", "vacancy/7", "javascript:void(0)", "ftp://hh.ru/vacancy/7"] {
            let err = extractor.extract(link).await.unwrap_err();
            assert!(matches!(
                err,
                ExtractionError::Navigation(NavigationError::InvalidLink { .. })
            ));
        }
        assert_eq!(browser.load_count(), 0);
    }
}
