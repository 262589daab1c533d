//! Deduplication and skill expansion
//!
//! Turns intermediate records into final rows: dates normalized, duplicate
//! listings dropped (first one wins), one row per skill, Cyrillic skill and
//! company names translated.

use std::collections::HashSet;

use tracing::{debug, info};

use super::date_normalizer;
use super::text_translator::TextTranslator;
use crate::domain::constants::output::SKILL_DELIMITER;
use crate::domain::{JobRecord, NormalizedRow};

/// Normalize every `time_posted`; blank dates become `None`
pub fn normalize_dates(records: Vec<JobRecord>) -> Vec<JobRecord> {
    records
        .into_iter()
        .map(|mut record| {
            record.time_posted = record
                .time_posted
                .as_deref()
                .map(date_normalizer::normalize)
                .filter(|date| !date.is_empty());
            record
        })
        .collect()
}

/// Stable dedup on everything but `link` and `keyword`
pub fn deduplicate(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let keep: Vec<bool> = {
        let mut seen = HashSet::new();
        records.iter().map(|record| seen.insert(record.dedup_key())).collect()
    };

    let before = records.len();
    let unique: Vec<JobRecord> = records
        .into_iter()
        .zip(keep)
        .filter_map(|(record, keep)| keep.then_some(record))
        .collect();

    debug!("Deduplicated {} records down to {}", before, unique.len());
    unique
}

/// Read a skills column as a list.
///
/// A bracketed value is read as a JSON string list; if it is not one, the
/// whole value is a single skill. Anything else is split on `", "`.
pub fn parse_skill_list(column: &str) -> Vec<String> {
    let trimmed = column.trim();
    if trimmed.starts_with('[') && trimmed.ends_with(']') {
        return serde_json::from_str::<Vec<String>>(trimmed).unwrap_or_else(|_| vec![column.to_string()]);
    }

    column.split(SKILL_DELIMITER).map(str::to_string).collect()
}

/// One row per (record, skill), blank skills dropped
pub fn expand(records: &[JobRecord]) -> Vec<NormalizedRow> {
    records
        .iter()
        .flat_map(|record| {
            parse_skill_list(&record.skills)
                .into_iter()
                .filter(|skill| !skill.trim().is_empty())
                .map(move |skill| {
                    NormalizedRow::new(
                        record.time_posted.clone().unwrap_or_default(),
                        record.keyword.clone(),
                        skill,
                        record.company.clone(),
                    )
                })
        })
        .collect()
}

/// Full intermediate → final transformation
pub async fn process(records: Vec<JobRecord>, translator: &TextTranslator) -> Vec<NormalizedRow> {
    let input = records.len();
    let unique = deduplicate(normalize_dates(records));
    let mut rows = expand(&unique);

    for row in &mut rows {
        row.skill = translator.translate(&row.skill).await;
        row.company = translator.translate(&row.company).await;
    }

    info!(
        "📊 Processed {} records: {} unique, {} skill rows",
        input,
        unique.len(),
        rows.len()
    );
    rows
}
