use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::fetcher::SessionFetcher;
use crate::parsers::parse_timestamp;
use crate::report::{Outcome, filter_by_outcome, render, render_json};
use crate::runner::{DEFAULT_PAGE_SIZE, DigdagCli, SessionQuery};
use crate::utils::get_digdag_program;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One line per session
    Text,
    /// JSON array of lines
    Json,
}

#[derive(Parser)]
#[command(name = "digdag-sessions")]
#[command(version = "0.1.0")]
#[command(about = "Find digdag sessions that failed before a cutoff time", long_about = None)]
pub struct Cli {
    /// digdag server endpoint, empty for the client default
    pub endpoint: String,

    /// Project name
    pub project: String,

    /// Workflow name
    pub workflow: String,

    /// Keep paging back until a session at or before this time is reached
    #[arg(value_parser = parse_cutoff)]
    pub cutoff: DateTime<Utc>,

    /// Number of sessions requested per page
    #[arg(short = 's', long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: u32,

    /// Sessions to report
    #[arg(long, value_enum, default_value_t = Outcome::Failed)]
    pub outcome: Outcome,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log every digdag invocation to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let query = SessionQuery::new(&cli.project, &cli.workflow)
        .with_endpoint(&cli.endpoint)
        .with_page_size(cli.page_size);
    let fetcher = SessionFetcher::new(DigdagCli::new(get_digdag_program()), query);

    let sessions = fetcher
        .fetch_until(cli.cutoff)
        .with_context(|| format!("Failed to fetch sessions of {}/{}", cli.project, cli.workflow))?;
    let sessions = filter_by_outcome(sessions, cli.outcome);

    match cli.format {
        OutputFormat::Text => {
            for line in render(&sessions) {
                println!("{}", line);
            }
        }
        OutputFormat::Json => {
            println!("{}", render_json(&sessions).context("Failed to render sessions as JSON")?)
        }
    }

    Ok(())
}

fn parse_cutoff(value: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(value).ok_or_else(|| format!("invalid cutoff time: {:?}", value))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
