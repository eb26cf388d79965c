mod config;
mod export;
mod models;
mod pipeline;
mod source;
mod types;
mod views;

use std::io::{stderr, stdout, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::level_filters::LevelFilter;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::config::{Config, Overrides, SourceKind};
use crate::pipeline::PipelineReport;
use crate::views::{Filters, ViewSet};

/// Cleans a snapshot of Airbnb listings and prints the dashboard views as JSON.
#[derive(Debug, Parser)]
#[command(name = "listing-dashboard", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    source_kind: Option<SourceKind>,

    /// CSV file, JSON/JSON Lines dump or mongoexport output
    #[arg(long)]
    source_path: Option<PathBuf>,

    #[arg(long, env = "LISTINGS_CONNECTION_URI", hide_env_values = true)]
    connection_uri: Option<String>,

    /// Keep only these neighbourhoods (repeatable)
    #[arg(long = "neighbourhood")]
    neighbourhoods: Vec<String>,

    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,

    /// Minimum number of available days in the next 365
    #[arg(long)]
    min_availability: Option<i64>,

    /// Where the cleaned dataset is cached
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Do not write the cleaned dataset cache
    #[arg(long)]
    no_cache: bool,

    /// Read the cached dataset instead of the source when it exists
    #[arg(long)]
    prefer_cache: bool,

    /// error, warn, info, debug or trace
    #[arg(long, default_value = "error")]
    log_level: String
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            source_kind: self.source_kind,
            source_path: self.source_path.clone(),
            connection_uri: self.connection_uri.clone(),
            neighbourhoods: self.neighbourhoods.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
            min_availability: self.min_availability,
            cache_path: self.cache_path.clone(),
            no_cache: self.no_cache,
            prefer_cache: self.prefer_cache
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    status: &'static str,
    summary: &'a PipelineReport,
    filters: &'a Filters,
    views: &'a ViewSet
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(cli.overrides());
    config.validate()?;

    let source = config.select_source()?;

    let timer = Instant::now();
    let dataset = config.pipeline().run(&source).await?;
    let duration = timer.elapsed();

    info!("Cleaned listings in: {duration:?}");

    if config.output.write_cache {
        //NOTE: The cache only speeds up later runs, so failing to write it must not fail this one
        if let Err(error) = export::write_cache(&dataset.frame, &config.output.cache_path) {
            warn!("Cleaned dataset was not cached: {error}");
        }
    }

    let views = ViewSet::build(&dataset, &config.filters);

    write_report_to_stdout(&Report {
        status: if views.is_empty() { "no_data" } else { "ok" },
        summary: &dataset.report,
        filters: &config.filters,
        views: &views
    })?;

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the JSON report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_report_to_stdout(report: &Report<'_>) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    serde_json::to_writer_pretty(&mut output, report)?;
    writeln!(output)?;

    output.flush()?;

    Ok(())
}
