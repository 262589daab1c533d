//! Pipeline driver
//!
//! keywords × pages → summaries → details → records → intermediate table →
//! normalized rows → final table. Failures stay local to the keyword, page or
//! job they happen in; cancellation stops fetching and flushes what exists.

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::detail_extractor::DetailExtractor;
use super::error::{ExtractionError, SetupError};
use super::page_extractor::PageExtractor;
use super::skills_processor;
use super::text_translator::TextTranslator;
use crate::domain::constants::site::PAGE_NUMBERING_BASE;
use crate::domain::{merge, JobDetail, JobRecord, JobSummary};
use crate::infrastructure::browser::{Browser, NavigationError};
use crate::infrastructure::config::utils::{display_keyword, search_page_url};
use crate::infrastructure::config::{AppConfig, OutputConfig, ScrapeConfig};
use crate::infrastructure::parsing::{JobDetailParser, JobListParser};
use crate::infrastructure::table_store;

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_loaded: usize,
    pub pages_failed: usize,
    pub listings: usize,
    pub details_failed: usize,
    pub records: usize,
    pub rows: usize,
    pub cancelled: bool,
}

impl RunSummary {
    pub fn log(&self, elapsed: Duration) {
        if self.cancelled {
            warn!("🛑 Run cancelled, partial results were written");
        }
        info!(
            "🏁 Finished in {:.1}s: {} pages loaded, {} failed, {} listings, {} details failed, {} records, {} rows",
            elapsed.as_secs_f64(),
            self.pages_loaded,
            self.pages_failed,
            self.listings,
            self.details_failed,
            self.records,
            self.rows
        );
    }
}

pub struct PipelineDriver {
    scrape: ScrapeConfig,
    output: OutputConfig,
    page_extractor: PageExtractor,
    detail_extractor: DetailExtractor,
    translator: TextTranslator,
    cancellation_token: CancellationToken,
}

impl PipelineDriver {
    pub fn new(
        config: &AppConfig,
        browser: Arc<dyn Browser>,
        translator: TextTranslator,
        cancellation_token: CancellationToken,
    ) -> Result<Self, SetupError> {
        let list_parser = JobListParser::with_config(&config.selectors.job_list_selectors)?;
        let detail_parser = JobDetailParser::with_config(&config.selectors.job_detail_selectors)?;

        Ok(Self {
            scrape: config.scrape.clone(),
            output: config.output.clone(),
            page_extractor: PageExtractor::new(browser.clone(), list_parser),
            detail_extractor: DetailExtractor::new(browser, detail_parser),
            translator,
            cancellation_token,
        })
    }

    /// Scrape, write the intermediate table, normalize, write the final table.
    ///
    /// Both writes are attempted even if the first one fails.
    pub async fn run(&self) -> Result<RunSummary> {
        let started = Instant::now();
        info!("🚀 Starting run for {} keywords", self.scrape.keywords.len());

        let (mut summary, records) = self.collect_records().await;

        let intermediate = table_store::write_intermediate(&self.output.intermediate_path, &records);
        if let Err(e) = &intermediate {
            error!("❌ {}", e);
        }

        let rows = skills_processor::process(records, &self.translator).await;
        summary.rows = rows.len();
        let final_table = table_store::write_final(&self.output.final_path, &rows);

        summary.log(started.elapsed());
        intermediate.context("Failed to write intermediate table")?;
        final_table.context("Failed to write final table")?;
        Ok(summary)
    }

    /// Scrape and write the intermediate table only
    pub async fn scrape(&self) -> Result<RunSummary> {
        let started = Instant::now();
        let (summary, records) = self.collect_records().await;

        table_store::write_intermediate(&self.output.intermediate_path, &records)
            .context("Failed to write intermediate table")?;

        summary.log(started.elapsed());
        Ok(summary)
    }

    async fn collect_records(&self) -> (RunSummary, Vec<JobRecord>) {
        let mut summary = RunSummary::default();
        let mut records = Vec::new();

        'keywords: for keyword in self.scrape.keywords.iter().filter(|k| !k.trim().is_empty()) {
            let keyword_label = display_keyword(keyword);
            info!("🔍 Keyword '{}'", keyword_label);

            for page_number in 0..self.scrape.total_pages {
                if self.cancellation_token.is_cancelled() {
                    break 'keywords;
                }

                let url = match search_page_url(
                    &self.scrape.search_url_template,
                    keyword,
                    PAGE_NUMBERING_BASE + page_number,
                ) {
                    Ok(url) => url,
                    Err(e) => {
                        warn!("Cannot build search URL for '{}' page {}: {}", keyword_label, page_number, e);
                        summary.pages_failed += 1;
                        continue;
                    }
                };

                match self.page_extractor.extract(&url, &keyword_label, page_number).await {
                    Ok(summaries) => {
                        summary.pages_loaded += 1;
                        summary.listings += summaries.len();
                        let page_records = self.collect_details(summaries, &mut summary).await;
                        records.extend(page_records);
                    }
                    Err(e) if e.is_cancelled() => break 'keywords,
                    Err(e) => {
                        summary.pages_failed += 1;
                        warn!("⚠️ Page {} for '{}' failed: {}", page_number, keyword_label, e);
                    }
                }

                self.pause(self.scrape.page_delay_ms).await;
            }
        }

        summary.records = records.len();
        summary.cancelled = self.cancellation_token.is_cancelled();
        (summary, records)
    }

    /// Fetch details with bounded concurrency; output order follows input order
    async fn collect_details(&self, summaries: Vec<JobSummary>, summary: &mut RunSummary) -> Vec<JobRecord> {
        let fetched: Vec<(JobSummary, Result<JobDetail, ExtractionError>)> = stream::iter(summaries)
            .map(|job| async move {
                let detail = self.fetch_detail(&job).await;
                (job, detail)
            })
            .buffered(self.scrape.detail_concurrency.max(1))
            .collect()
            .await;

        let mut records = Vec::with_capacity(fetched.len());
        for (job, detail) in fetched {
            match detail.map(|detail| merge(&job, detail)) {
                Ok(Ok(record)) => records.push(record),
                Ok(Err(e)) => {
                    summary.details_failed += 1;
                    warn!("Dropping '{}': {}", job.title, e);
                }
                Err(e) if e.is_cancelled() => {}
                Err(e) => {
                    summary.details_failed += 1;
                    warn!("⚠️ No details for '{}' ({}): {}", job.title, job.link, e);
                }
            }
        }
        records
    }

    async fn fetch_detail(&self, job: &JobSummary) -> Result<JobDetail, ExtractionError> {
        if self.cancellation_token.is_cancelled() {
            return Err(NavigationError::Cancelled {
                url: job.link.to_string(),
            }
            .into());
        }
        let detail = self.detail_extractor.extract(job.link.as_str()).await;
        self.pause(self.scrape.detail_delay_ms).await;
        detail
    }

    /// Sleep that wakes early on cancellation
    async fn pause(&self, millis: u64) {
        if millis == 0 {
            return;
        }
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(millis)) => {}
            _ = self.cancellation_token.cancelled() => {}
        }
    }
}

/// Read an intermediate table, normalize it and write the final table
pub async fn process_intermediate(input: &Path, output: &Path, translator: &TextTranslator) -> Result<RunSummary> {
    let started = Instant::now();
    let records = table_store::read_intermediate(input)
        .with_context(|| format!("Failed to read intermediate table {}", input.display()))?;

    let mut summary = RunSummary {
        records: records.len(),
        ..Default::default()
    };

    let rows = skills_processor::process(records, translator).await;
    summary.rows = rows.len();
    table_store::write_final(output, &rows).context("Failed to write final table")?;

    summary.log(started.elapsed());
    Ok(summary)
}
