//! Application error types

use thiserror::Error;

use crate::infrastructure::browser::NavigationError;
use crate::infrastructure::parsing::ParsingError;

/// Failure to turn one page into data. Always isolated to that page or job.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Parsing(#[from] ParsingError),
}

impl ExtractionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Navigation(e) if e.is_cancelled())
    }
}

/// Failure to build the pipeline's collaborators; fatal for the run
#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Invalid selector configuration: {0}")]
    Selectors(#[from] ParsingError),

    #[error("Failed to initialize {component}: {source}")]
    Component {
        component: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl SetupError {
    pub fn component(component: &'static str, source: anyhow::Error) -> Self {
        Self::Component { component, source }
    }
}
