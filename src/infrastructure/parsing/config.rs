//! Parsing configuration for HTML extraction
//!
//! Centralized CSS selectors for hh.ru search and vacancy pages. Each field
//! takes a list of selectors tried in order, so markup changes can be patched
//! from the config file without a rebuild.

use serde::{Deserialize, Serialize};

/// Main parsing configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    /// Search result page selectors
    pub job_list_selectors: JobListSelectors,

    /// Vacancy page selectors
    pub job_detail_selectors: JobDetailSelectors,
}

/// CSS selectors for search result pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobListSelectors {
    /// One element per listing
    pub listing_container: Vec<String>,

    /// Vacancy title, relative to the listing
    pub title: Vec<String>,

    /// Employer name parts; every match is joined with a space
    pub employer: Vec<String>,

    /// Vacancy address / city
    pub location: Vec<String>,

    /// Anchor carrying the vacancy page `href`
    pub link: Vec<String>,
}

impl Default for JobListSelectors {
    fn default() -> Self {
        Self {
            listing_container: vec![
                "div.vacancy-info--umZA61PpMY07JVJtomBA".to_string(),
                "div[data-qa='vacancy-serp__vacancy']".to_string(),
                "div.vacancy-serp-item__layout".to_string(),
            ],
            title: vec![
                "span[data-qa='serp-item__title-text']".to_string(),
                "a[data-qa='serp-item__title']".to_string(),
            ],
            employer: vec![
                "span[data-qa='vacancy-serp__vacancy-employer-text']".to_string(),
                "a[data-qa='vacancy-serp__vacancy-employer']".to_string(),
            ],
            location: vec![
                "span[data-qa='vacancy-serp__vacancy-address']".to_string(),
                "div[data-qa='vacancy-serp__vacancy-address']".to_string(),
            ],
            link: vec![
                "h2.bloko-header-section-2 a[href]".to_string(),
                "a[data-qa='serp-item__title'][href]".to_string(),
            ],
        }
    }
}

/// CSS selectors for vacancy detail pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobDetailSelectors {
    /// Net salary; absent on most vacancies
    pub salary: Vec<String>,

    /// Required experience, the only mandatory detail field
    pub experience: Vec<String>,

    /// One element per key skill
    pub skills: Vec<String>,

    /// Element whose whole text is the posting date
    pub time_posted: Vec<String>,

    /// Elements whose text embeds the posting date in a sentence
    /// (`Вакансия опубликована 15 марта 2024 в Ташкенте`)
    pub time_posted_sentence: Vec<String>,
}

impl Default for JobDetailSelectors {
    fn default() -> Self {
        Self {
            // Net amount only; a gross figure is not the same salary
            salary: vec!["span[data-qa='vacancy-salary-compensation-type-net']".to_string()],
            experience: vec!["span[data-qa='vacancy-experience']".to_string()],
            skills: vec![
                "li[data-qa='skills-element']".to_string(),
                "span[data-qa='bloko-tag__text']".to_string(),
            ],
            time_posted: vec!["span[data-sentry-source-file='index.tsx']".to_string()],
            time_posted_sentence: vec![
                "p.vacancy-creation-time-redesigned".to_string(),
                "p.vacancy-creation-time".to_string(),
            ],
        }
    }
}
