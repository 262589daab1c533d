//! Command line interface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "hh-job-scraper", version, about = "hh.ru vacancy scraper and skill table builder")]
pub struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Command {
    /// Scrape hh.ru and build both tables
    #[default]
    Run,
    /// Scrape hh.ru and write the intermediate table only
    Scrape,
    /// Build the final table from an existing intermediate table
    Process,
}

impl Cli {
    /// `run` when no subcommand is given
    pub fn subcommand(&self) -> Command {
        self.command.unwrap_or_default()
    }
}
