use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use hh_job_scraper::application::{process_intermediate, PipelineDriver, SetupError, TextTranslator};
use hh_job_scraper::cli::{Cli, Command};
use hh_job_scraper::infrastructure::config::{AppConfig, ConfigManager};
use hh_job_scraper::infrastructure::logging::{init_logging_with_config, log_system_info};
use hh_job_scraper::infrastructure::{GoogleTranslateClient, HttpBrowser, HttpClient};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging_with_config(&config.logging) {
        eprintln!("❌ Failed to initialize logging: {e:#}");
        return ExitCode::FAILURE;
    }
    log_system_info();

    let cancellation_token = CancellationToken::new();
    spawn_interrupt_handler(cancellation_token.clone());

    match execute(args.subcommand(), &config, cancellation_token).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.downcast_ref::<SetupError>().is_some() => {
            error!("❌ {e:#}");
            ExitCode::FAILURE
        }
        Err(e) => {
            // run-level failures are reported, partial output is already on disk
            error!("❌ {e:#}");
            ExitCode::SUCCESS
        }
    }
}

async fn load_config(args: &Cli) -> Result<AppConfig> {
    let manager = match &args.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    manager.load_config().await
}

fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                warn!("🛑 Interrupt received, finishing with partial results");
                token.cancel();
            }
            Err(e) => warn!("Cannot listen for Ctrl-C: {}", e),
        }
    });
}

fn build_translator(config: &AppConfig) -> Result<TextTranslator, SetupError> {
    if !config.translation.enabled {
        info!("Translation disabled");
        return Ok(TextTranslator::disabled());
    }
    let client = GoogleTranslateClient::new(&config.translation)
        .map_err(|e| SetupError::component("translation client", e))?;
    Ok(TextTranslator::new(Arc::new(client), &config.translation))
}

fn build_driver(config: &AppConfig, cancellation_token: CancellationToken) -> Result<PipelineDriver, SetupError> {
    let http_client =
        HttpClient::new(config.http.clone()).map_err(|e| SetupError::component("HTTP client", e))?;
    let browser = Arc::new(HttpBrowser::new(http_client, cancellation_token.clone()));
    PipelineDriver::new(config, browser, build_translator(config)?, cancellation_token)
}

async fn execute(command: Command, config: &AppConfig, cancellation_token: CancellationToken) -> Result<()> {
    match command {
        Command::Run => {
            build_driver(config, cancellation_token)?.run().await?;
        }
        Command::Scrape => {
            build_driver(config, cancellation_token)?.scrape().await?;
        }
        Command::Process => {
            let translator = build_translator(config)?;
            process_intermediate(&config.output.intermediate_path, &config.output.final_path, &translator)
                .await
                .context("Processing failed")?;
        }
    }
    Ok(())
}
