//! Parsing error types
//!
//! Every variant describes one listing or one detail page; none of them is
//! allowed to abort a run.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    #[error("Required field '{field}' not found in HTML")]
    RequiredFieldMissing {
        field: String,
        context: Option<String>,
    },

    #[error("Invalid CSS selector: {selector} - {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("URL resolution failed: {url} - {reason}")]
    UrlResolutionFailed {
        url: String,
        reason: String,
        base_url: Option<String>,
    },
}

impl ParsingError {
    /// Create a required field missing error with context
    pub fn required_field_missing(field: &str, context: Option<&str>) -> Self {
        Self::RequiredFieldMissing {
            field: field.to_string(),
            context: context.map(ToString::to_string),
        }
    }

    pub fn url_resolution_failed(url: &str, reason: impl Into<String>, base_url: Option<&str>) -> Self {
        Self::UrlResolutionFailed {
            url: url.to_string(),
            reason: reason.into(),
            base_url: base_url.map(ToString::to_string),
        }
    }

    /// Whether the surrounding loop should keep going after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::RequiredFieldMissing { .. } | Self::UrlResolutionFailed { .. } => true,
            Self::InvalidSelector { .. } => false,
        }
    }
}

pub type ParsingResult<T> = Result<T, ParsingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ParsingError::required_field_missing("title", Some("job listing"));
        assert_eq!(err.to_string(), "Required field 'title' not found in HTML");
        assert!(err.is_recoverable());

        let err = ParsingError::InvalidSelector {
            selector: "div[".to_string(),
            reason: "unexpected end".to_string(),
        };
        assert!(!err.is_recoverable());
    }
}
