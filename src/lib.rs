//! hh-job-scraper - hh.ru vacancy scraping and skill table pipeline
//!
//! Scrapes vacancy search results and detail pages from hh.ru, stores the
//! merged records in an intermediate CSV table, then normalizes dates,
//! deduplicates listings, expands skills to one row each and translates
//! Cyrillic values into a final CSV table.

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_utils;
