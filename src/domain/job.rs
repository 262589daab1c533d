//! Job listing entities
//!
//! `JobSummary` and `JobDetail` only live while a run is in flight.
//! `JobRecord` is the intermediate table row, `NormalizedRow` the final one.

use serde::{Deserialize, Serialize};
use url::Url;

use super::constants::output::{COUNTRY, SKILL_DELIMITER};

/// One listing on a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Detail page link, also the join key against `JobDetail`
    pub link: Url,
    /// Human readable search keyword (`Data analyst`, not `Data+analyst`)
    pub keyword: String,
}

/// Data scraped from a vacancy detail page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetail {
    pub salary: Option<String>,
    pub required_experience: String,
    pub skills: Vec<String>,
    /// Raw, localized posting date (`15 марта 2024`)
    pub time_posted: Option<String>,
    pub link: Url,
}

/// Merged summary + detail, persisted to the intermediate table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary: Option<String>,
    pub required_experience: String,
    /// Skill list in its column form, joined with `", "`
    pub skills: String,
    pub time_posted: Option<String>,
    pub link: String,
    pub keyword: String,
}

/// Borrowed view of the fields two records must share to be the same listing.
///
/// `link` and `keyword` are excluded: the same vacancy shows up under several
/// keywords and sometimes under several links.
pub type DedupKey<'a> = (
    &'a str,
    &'a str,
    &'a str,
    Option<&'a str>,
    &'a str,
    &'a str,
    Option<&'a str>,
);

impl JobRecord {
    pub fn dedup_key(&self) -> DedupKey<'_> {
        (
            &self.title,
            &self.company,
            &self.location,
            self.salary.as_deref(),
            &self.required_experience,
            &self.skills,
            self.time_posted.as_deref(),
        )
    }

    /// Join a skill list into its column form
    pub fn join_skills(skills: &[String]) -> String {
        skills.join(SKILL_DELIMITER)
    }
}

/// One (record, skill) pair of the final table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRow {
    /// Canonical `MM/DD/YYYY`, empty, or the untouched source string when it could not be parsed
    pub time_posted: String,
    pub keyword: String,
    #[serde(rename = "skills")]
    pub skill: String,
    pub company: String,
    pub country: String,
}

impl NormalizedRow {
    pub fn new(time_posted: String, keyword: String, skill: String, company: String) -> Self {
        Self {
            time_posted,
            keyword,
            skill,
            company,
            country: COUNTRY.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, keyword: &str) -> JobRecord {
        JobRecord {
            title: "Backend developer".to_string(),
            company: "EPAM".to_string(),
            location: "Ташкент".to_string(),
            salary: None,
            required_experience: "1–3 года".to_string(),
            skills: "Python, SQL".to_string(),
            time_posted: Some("15 марта 2024".to_string()),
            link: link.to_string(),
            keyword: keyword.to_string(),
        }
    }

    #[test]
    fn test_dedup_key_ignores_link_and_keyword() {
        let a = record("https://hh.ru/vacancy/1", "Backend developer");
        let b = record("https://hh.ru/vacancy/2", "Full stack developer");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_dedup_key_distinguishes_missing_salary() {
        let a = record("https://hh.ru/vacancy/1", "x");
        let mut b = a.clone();
        b.salary = Some(String::new());
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_normalized_row_carries_country() {
        let row = NormalizedRow::new(String::new(), "k".into(), "Rust".into(), "c".into());
        assert_eq!(row.country, "Uzbekistan");
    }

    #[test]
    fn test_join_skills() {
        let skills = vec!["Python".to_string(), "SQL".to_string()];
        assert_eq!(JobRecord::join_skills(&skills), "Python, SQL");
        assert_eq!(JobRecord::join_skills(&[]), "");
    }
}
