//! Configuration infrastructure
//!
//! Configuration is read from a JSON file in the user config directory and
//! layered with `HHJOBS__<SECTION>__<KEY>` environment overrides. A missing
//! file is created from the defaults on first run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::info;

use super::http_client::HttpClientConfig;
use super::parsing::ParsingConfig;
use crate::domain::constants::site;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scrape: ScrapeConfig,
    pub http: HttpClientConfig,
    pub selectors: ParsingConfig,
    pub translation: TranslationConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// What to search for and how fast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    /// Search URL with a `{keyword}` placeholder; `&page=N` is appended
    pub search_url_template: String,

    /// Search keywords, `+` or spaces between words
    pub keywords: Vec<String>,

    /// Result pages to visit per keyword
    pub total_pages: u32,

    /// Pause after each search page load
    pub page_delay_ms: u64,

    /// Pause after each vacancy page load
    pub detail_delay_ms: u64,

    /// Vacancy pages fetched at once (1 = sequential)
    pub detail_concurrency: usize,
}

/// Translation of Cyrillic skill and company values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub source_language: String,
    pub target_language: String,
    pub timeout_seconds: u64,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub retry_max_delay_ms: u64,
    /// Consecutive failed translations before the breaker opens
    pub failure_threshold: u32,
}

/// Output table locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub intermediate_path: PathBuf,
    pub final_path: PathBuf,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted file logs
    pub json_format: bool,

    pub console_output: bool,

    pub file_output: bool,

    /// Log directory; defaults to `logs/` next to the executable
    pub log_dir: Option<PathBuf>,

    pub file_name: String,

    /// Rotated log files to keep (older files will be deleted)
    pub max_files: u32,

    /// Module-specific log level filters (e.g., "reqwest": "warn")
    pub module_filters: HashMap<String, String>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            search_url_template: site::SEARCH_URL_TEMPLATE.to_string(),
            keywords: defaults::KEYWORDS.iter().map(ToString::to_string).collect(),
            total_pages: defaults::TOTAL_PAGES,
            page_delay_ms: defaults::PAGE_DELAY_MS,
            detail_delay_ms: defaults::DETAIL_DELAY_MS,
            detail_concurrency: defaults::DETAIL_CONCURRENCY,
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: defaults::TRANSLATE_ENDPOINT.to_string(),
            source_language: "auto".to_string(),
            target_language: "en".to_string(),
            timeout_seconds: defaults::TRANSLATE_TIMEOUT_SECONDS,
            max_retries: defaults::TRANSLATE_MAX_RETRIES,
            retry_base_delay_ms: defaults::TRANSLATE_RETRY_BASE_DELAY_MS,
            retry_max_delay_ms: defaults::TRANSLATE_RETRY_MAX_DELAY_MS,
            failure_threshold: defaults::TRANSLATE_FAILURE_THRESHOLD,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            intermediate_path: PathBuf::from(defaults::INTERMEDIATE_FILE),
            final_path: PathBuf::from(defaults::FINAL_FILE),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: false,
            console_output: true,
            file_output: true,
            log_dir: None,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            max_files: defaults::LOG_MAX_FILES,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("reqwest".to_string(), "info".to_string());
                filters.insert("hyper".to_string(), "warn".to_string());
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| {
            Err(ConfigError::Validation {
                message: message.to_string(),
            })
        };

        if !self.scrape.search_url_template.contains("{keyword}") {
            return invalid("scrape.search_url_template must contain a {keyword} placeholder");
        }
        if self.scrape.keywords.iter().all(|k| k.trim().is_empty()) {
            return invalid("scrape.keywords must name at least one keyword");
        }
        if self.scrape.detail_concurrency == 0 {
            return invalid("scrape.detail_concurrency must be greater than 0");
        }
        if self.translation.failure_threshold == 0 {
            return invalid("translation.failure_threshold must be greater than 0");
        }
        if self.translation.timeout_seconds == 0 {
            return invalid("translation.timeout_seconds must be greater than 0");
        }
        Ok(())
    }
}

/// Configuration file manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Get the application configuration directory
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get user config directory")?
            .join("hh-job-scraper");

        Ok(config_dir)
    }

    /// Manager for the default config file location
    pub fn new() -> Result<Self> {
        Ok(Self::with_path(Self::get_config_dir()?.join("config.json")))
    }

    pub fn with_path(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
        }
    }

    /// Load configuration, creating the file from defaults if it doesn't exist
    pub async fn load_config(&self) -> Result<AppConfig> {
        if !self.config_path.exists() {
            info!("Configuration file not found, creating default: {:?}", self.config_path);
            self.save_config(&AppConfig::default()).await?;
        }

        let config = Self::load_layered(&self.config_path, None)
            .with_context(|| format!("Failed to read configuration from {:?}", self.config_path))?;
        config.validate()?;

        info!("Loaded configuration from: {:?}", self.config_path);
        Ok(config)
    }

    /// File source first, environment overrides on top.
    ///
    /// `environment` replaces the process environment when given.
    fn load_layered(
        path: &Path,
        environment: Option<config::Map<String, String>>,
    ) -> Result<AppConfig, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Json).required(false))
            .add_source(
                config::Environment::with_prefix("HHJOBS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("scrape.keywords")
                    .source(environment),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Save configuration as pretty JSON
    pub async fn save_config(&self, config: &AppConfig) -> Result<()> {
        if let Some(config_dir) = self.config_path.parent() {
            if !config_dir.as_os_str().is_empty() && !config_dir.exists() {
                fs::create_dir_all(config_dir)
                    .await
                    .context("Failed to create config directory")?;
                info!("📁 Created configuration directory: {:?}", config_dir);
            }
        }

        let content = serde_json::to_string_pretty(config).context("Failed to serialize configuration")?;
        fs::write(&self.config_path, content)
            .await
            .context("Failed to write configuration file")?;

        info!("Saved configuration to: {:?}", self.config_path);
        Ok(())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }
}

/// Default configuration values
pub mod defaults {
    /// Search keywords of the Uzbekistan IT market survey
    pub const KEYWORDS: &[&str] = &[
        "Backend+developer",
        "Frontend+developer",
        "Data+analyst",
        "Data+engineer",
        "Data+scientist",
        "AI+engineer",
        "Android+developer",
        "IOS+developer",
        "Game+developer",
        "DevOps+engineer",
        "IT+project+manager",
        "Network+engineer",
        "Cybersecurity+Analyst",
        "Full+stack+developer",
        "Cloud+Architect",
    ];

    /// Default result pages per keyword (100 listings each)
    pub const TOTAL_PAGES: u32 = 1;

    pub const PAGE_DELAY_MS: u64 = 2000;

    pub const DETAIL_DELAY_MS: u64 = 2000;

    pub const DETAIL_CONCURRENCY: usize = 1;

    pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    pub const ACCEPT_LANGUAGE: &str = "ru-RU,ru;q=0.9,en;q=0.8";

    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    pub const MAX_REQUESTS_PER_SECOND: u32 = 2;

    pub const TRANSLATE_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

    pub const TRANSLATE_TIMEOUT_SECONDS: u64 = 10;

    pub const TRANSLATE_MAX_RETRIES: u32 = 2;

    pub const TRANSLATE_RETRY_BASE_DELAY_MS: u64 = 500;

    pub const TRANSLATE_RETRY_MAX_DELAY_MS: u64 = 8000;

    pub const TRANSLATE_FAILURE_THRESHOLD: u32 = 5;

    pub const INTERMEDIATE_FILE: &str = "scraped_jobs.csv";

    pub const FINAL_FILE: &str = "translated_expanded_skills_in.csv";

    pub const LOG_LEVEL: &str = "info";

    pub const LOG_FILE_NAME: &str = "hh-job-scraper.log";

    pub const LOG_MAX_FILES: u32 = 5;
}

/// URL building helper functions
pub mod utils {
    use url::Url;

    /// Keyword as it appears in the query string (`Data+analyst`)
    pub fn query_keyword(keyword: &str) -> String {
        keyword.split_whitespace().collect::<Vec<_>>().join("+")
    }

    /// Keyword as it is stored in the tables (`Data analyst`)
    pub fn display_keyword(keyword: &str) -> String {
        keyword.replace('+', " ").split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Build the URL of one 0-based search result page
    pub fn search_page_url(template: &str, keyword: &str, page: u32) -> Result<Url, url::ParseError> {
        let base = template.replace("{keyword}", &query_keyword(keyword));
        Url::parse(&format!("{base}&page={page}"))
    }
}
