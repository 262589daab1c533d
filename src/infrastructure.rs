//! Infrastructure layer: page loading, parsing, translation and persistence
//!
//! Everything that talks to the network or the filesystem lives here,
//! behind the `Browser` and `TranslationService` seams.

pub mod browser;
pub mod config;
pub mod http_client;
pub mod logging;
pub mod parsing;
pub mod retry_manager;
pub mod table_store;
pub mod translation;

pub use browser::{Browser, HttpBrowser, NavigationError, Page};
pub use config::{AppConfig, ConfigError, ConfigManager};
pub use http_client::{HttpClient, HttpClientConfig};
pub use logging::{get_log_directory, init_logging_with_config};
pub use parsing::{JobDetailParser, JobListParser, ParsingConfig, ParsingError, ParsingResult};
pub use retry_manager::{CircuitBreaker, RetryPolicy, RetryableError};
pub use table_store::{TableError, TableResult};
pub use translation::{GoogleTranslateClient, TranslationError, TranslationService};
