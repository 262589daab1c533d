//! Vacancy detail page parser
//!
//! Salary and posting date are optional: a missing node yields `None`.
//! Required experience is mandatory: without it the page yields no detail.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use tracing::debug;

use super::config::JobDetailSelectors;
use super::context::DetailParseContext;
use super::{all_texts, compile_selectors, first_text, ContextualParser, ParsingError, ParsingResult};
use crate::domain::JobDetail;

/// `15 марта 2024` inside a longer sentence
static EMBEDDED_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})\s+([а-яё]+)\s+(\d{4})\b").expect("valid date regex"));

/// Parser for extracting vacancy details
pub struct JobDetailParser {
    salary_selectors: Vec<Selector>,
    experience_selectors: Vec<Selector>,
    skill_selectors: Vec<Selector>,
    time_posted_selectors: Vec<Selector>,
    time_posted_sentence_selectors: Vec<Selector>,
}

impl JobDetailParser {
    /// Create a new parser with the default hh.ru selectors
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&JobDetailSelectors::default())
    }

    /// Create parser with custom selector configuration
    pub fn with_config(selectors: &JobDetailSelectors) -> ParsingResult<Self> {
        Ok(Self {
            salary_selectors: compile_selectors(&selectors.salary)?,
            experience_selectors: compile_selectors(&selectors.experience)?,
            skill_selectors: compile_selectors(&selectors.skills)?,
            time_posted_selectors: compile_selectors(&selectors.time_posted)?,
            time_posted_sentence_selectors: compile_selectors(&selectors.time_posted_sentence)?,
        })
    }
}

impl ContextualParser for JobDetailParser {
    type Output = JobDetail;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        debug!("Parsing job detail from: {}", context.url);
        let root = std::iter::once(html.root_element());

        let required_experience = first_text(root.clone(), &self.experience_selectors)
            .ok_or_else(|| ParsingError::required_field_missing("required_experience", Some(context.url.as_str())))?;

        let salary = first_text(root.clone(), &self.salary_selectors);

        let skills = all_texts(root.clone(), &self.skill_selectors).unwrap_or_default();

        let time_posted = first_text(root.clone(), &self.time_posted_selectors).or_else(|| {
            first_text(root, &self.time_posted_sentence_selectors).and_then(|sentence| extract_embedded_date(&sentence))
        });

        debug!(
            "Extracted detail for {}: {} skills, salary {}, posted {:?}",
            context.url,
            skills.len(),
            if salary.is_some() { "present" } else { "absent" },
            time_posted
        );

        Ok(JobDetail {
            salary,
            required_experience,
            skills,
            time_posted,
            link: context.url.clone(),
        })
    }
}

/// Pull `day month year` out of a sentence, keeping the localized month name
fn extract_embedded_date(sentence: &str) -> Option<String> {
    EMBEDDED_DATE
        .captures(sentence)
        .map(|caps| format!("{} {} {}", &caps[1], &caps[2], &caps[3]))
}
