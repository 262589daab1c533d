//! HTML parsing infrastructure for hh.ru pages
//!
//! Trait-based parsers over `scraper::Html` with configurable fallback
//! selectors and per-item error isolation.

pub mod config;
pub mod context;
pub mod error;
pub mod job_detail_parser;
pub mod job_list_parser;

pub use config::{JobDetailSelectors, JobListSelectors, ParsingConfig};
pub use context::{DetailParseContext, ParseContext};
pub use error::{ParsingError, ParsingResult};
pub use job_detail_parser::JobDetailParser;
pub use job_list_parser::JobListParser;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

/// Parser with contextual information
pub trait ContextualParser {
    type Output;
    type Context;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Compile selector strings, skipping the ones that do not parse.
///
/// Fails only when none of a non-empty list compiles.
pub(crate) fn compile_selectors(selector_strings: &[String]) -> ParsingResult<Vec<Selector>> {
    let mut selectors = Vec::new();
    let mut errors = Vec::new();

    for selector_str in selector_strings {
        match Selector::parse(selector_str) {
            Ok(selector) => selectors.push(selector),
            Err(e) => {
                warn!("Failed to compile selector '{}': {}", selector_str, e);
                errors.push(format!("'{selector_str}': {e}"));
            }
        }
    }

    if selectors.is_empty() && !selector_strings.is_empty() {
        return Err(ParsingError::InvalidSelector {
            selector: selector_strings.join(" | "),
            reason: errors.join(", "),
        });
    }

    if !errors.is_empty() {
        debug!("Some selectors failed to compile: {}", errors.join(", "));
    }

    Ok(selectors)
}

/// Visible text of an element: whitespace runs (NBSP included) collapsed to one space
pub fn element_text(element: &ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty text under `root` matched by any selector, tried in order
pub(crate) fn first_text<'a>(
    root: impl Iterator<Item = ElementRef<'a>> + Clone,
    selectors: &[Selector],
) -> Option<String> {
    selectors.iter().find_map(|selector| {
        root.clone()
            .flat_map(|element| element.select(selector))
            .map(|element| element_text(&element))
            .find(|text| !text.is_empty())
    })
}

/// All texts matched by the first selector that matches anything
pub(crate) fn all_texts<'a>(
    root: impl Iterator<Item = ElementRef<'a>> + Clone,
    selectors: &[Selector],
) -> Option<Vec<String>> {
    selectors.iter().find_map(|selector| {
        let texts: Vec<String> = root
            .clone()
            .flat_map(|element| element.select(selector))
            .map(|element| element_text(&element))
            .collect();
        (!texts.is_empty()).then_some(texts)
    })
}
