//! Posting date normalization
//!
//! hh.ru prints dates as `15 марта 2024`. Month names are matched as whole
//! tokens, ignoring case, then the date is parsed as `day month year`.
//! Only full month names are accepted; `15 Mar 2024` stays as given.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::constants::locale::{CANONICAL_DATE_FORMAT, RUSSIAN_GENITIVE_MONTHS, SOURCE_DATE_FORMAT};

/// Convert a localized posting date to `MM/DD/YYYY`.
///
/// Blank input yields `""`; anything that does not parse is returned as given.
pub fn normalize(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    let tokens: Vec<&str> = raw.split_whitespace().map(english_month).collect();
    if !matches!(tokens.as_slice(), [_, month, _] if is_full_month_name(month)) {
        debug!("Keeping unparsed date '{}': no full month name", raw);
        return raw.to_string();
    }
    let substituted = tokens.join(" ");

    match NaiveDate::parse_from_str(&substituted, SOURCE_DATE_FORMAT) {
        Ok(date) => date.format(CANONICAL_DATE_FORMAT).to_string(),
        Err(e) => {
            debug!("Keeping unparsed date '{}': {}", raw, e);
            raw.to_string()
        }
    }
}

fn english_month(token: &str) -> &str {
    let lowered = token.to_lowercase();
    RUSSIAN_GENITIVE_MONTHS
        .iter()
        .find(|(russian, _)| *russian == lowered)
        .map_or(token, |(_, english)| *english)
}

fn is_full_month_name(token: &str) -> bool {
    RUSSIAN_GENITIVE_MONTHS
        .iter()
        .any(|(_, english)| english.eq_ignore_ascii_case(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("15 марта 2024", "03/15/2024")]
    #[case("1 января 2023", "01/01/2023")]
    #[case("31 декабря 2024", "12/31/2024")]
    #[case("7 мая 2024", "05/07/2024")]
    #[case("  15   Марта 2024 ", "03/15/2024")]
    #[case("15 March 2024", "03/15/2024")]
    fn test_parses_localized_dates(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize(raw), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_input_is_empty(#[case] raw: &str) {
        assert_eq!(normalize(raw), "");
    }

    #[rstest]
    #[case("not a date")]
    #[case("вчера")]
    #[case("31 февраля 2024")]
    #[case("15 мартаа 2024")]
    #[case("15 Mar 2024")]
    #[case("15 Sept 2024")]
    #[case("15 марта 2024 года")]
    fn test_unparseable_input_is_returned_unchanged(#[case] raw: &str) {
        assert_eq!(normalize(raw), raw);
    }

    #[test]
    fn test_month_inside_a_word_is_not_substituted() {
        // "мая" is a substring of "маяк"; only whole tokens are months
        assert_eq!(english_month("маяк"), "маяк");
        assert_eq!(english_month("МАЯ"), "May");
    }
}
