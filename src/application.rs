//! Application layer - extraction, normalization and the pipeline driver
//!
//! Each module is its own file in the application/ directory.

pub mod date_normalizer;
pub mod detail_extractor;
pub mod error;
pub mod page_extractor;
pub mod pipeline;
pub mod skills_processor;
pub mod text_translator;

pub use detail_extractor::DetailExtractor;
pub use error::{ExtractionError, SetupError};
pub use page_extractor::PageExtractor;
pub use pipeline::{process_intermediate, PipelineDriver, RunSummary};
pub use text_translator::TextTranslator;
