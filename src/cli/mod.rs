//! Command-line interface

mod report;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use tracing::warn;

use crate::config::Config;
use crate::logging::{self, LogTarget};
use crate::parsers::parse_year;
use crate::services::{Aggregator, DataLoaderService, DatasetService};
use crate::types::Dataset;

/// Terminal dashboard for airline on-time performance data
#[derive(Parser)]
#[command(name = "airdash")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by every subcommand
#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Read flights from a local CSV instead of downloading
    #[arg(long, global = true, value_name = "PATH")]
    data: Option<PathBuf>,

    /// Dataset URL (overrides the config file)
    #[arg(long, global = true, value_name = "URL")]
    url: Option<String>,

    /// Config file [default: ~/.airdash/config.toml]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Download the dataset even if the cached copy is fresh
    #[arg(long, global = true)]
    refresh: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive dashboard (default)
    Tui {
        /// Year shown on start
        #[arg(long)]
        year: Option<String>,
    },

    /// Print the five summary tables for a year
    Summary {
        /// Year to summarize
        #[arg(long)]
        year: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List years present in the dataset
    Years {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download the dataset into the local cache
    Fetch,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let target = match self.command {
            None | Some(Commands::Tui { .. }) => LogTarget::File,
            Some(_) => LogTarget::Stderr,
        };
        logging::init(target, self.source.verbose);

        let config = self.source.load_config()?;

        match self.command {
            None => {
                let loader = self.source.loader(&config)?;
                crate::tui::run(loader, config.dashboard.default_year)
            }
            Some(Commands::Tui { year }) => {
                let initial_year = match year {
                    Some(text) => parse_year(&text)?,
                    None => config.dashboard.default_year,
                };
                let loader = self.source.loader(&config)?;
                crate::tui::run(loader, initial_year)
            }
            Some(Commands::Summary { year, json }) => {
                // Reject bad input before touching the network
                let year = parse_year(&year)?;
                let loaded = self.source.loader(&config)?.load()?;
                warn_if_year_absent(&loaded.dataset, year);
                let summary = Aggregator::summarize(loaded.dataset.records(), year);

                if json {
                    println!("{}", serde_json::to_string_pretty(&summary)?);
                } else {
                    print!("{}", report::render_summary(&summary));
                }
                Ok(())
            }
            Some(Commands::Years { json }) => {
                let loaded = self.source.loader(&config)?.load()?;
                let years = loaded.dataset.years();

                if json {
                    println!("{}", serde_json::to_string_pretty(&years)?);
                } else {
                    print!("{}", report::render_years(&years));
                }
                Ok(())
            }
            Some(Commands::Fetch) => {
                if self.source.data.is_some() {
                    bail!("fetch downloads the remote dataset; drop --data");
                }
                let loaded = self.source.loader(&config)?.with_refresh(true).load()?;
                println!(
                    "Fetched {} records ({} skipped) from {}",
                    loaded.dataset.len(),
                    loaded.skipped_rows,
                    config.dataset.url
                );
                Ok(())
            }
        }
    }
}

/// Log the covered range when `year` has no rows; the empty report still prints.
/// Returns true if the year is absent.
fn warn_if_year_absent(dataset: &Dataset, year: i32) -> bool {
    if dataset.contains_year(year) {
        return false;
    }
    let years = dataset.years();
    match (years.first(), years.last()) {
        (Some(first), Some(last)) => warn!(
            year,
            first = first.year,
            last = last.year,
            "year not present in dataset"
        ),
        _ => warn!(year, "dataset has no records"),
    }
    true
}

impl SourceArgs {
    /// Config file merged with command-line overrides
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load_or_default(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(url) = &self.url {
            config.dataset.url = url.clone();
        }
        Ok(config)
    }

    fn loader(&self, config: &Config) -> anyhow::Result<DataLoaderService> {
        if let Some(path) = &self.data {
            return Ok(DataLoaderService::from_file(path.clone()));
        }

        let service = DatasetService::new(&config.dataset, config.cache_ttl_secs())?;
        Ok(DataLoaderService::from_remote(service).with_refresh(self.refresh))
    }
}
