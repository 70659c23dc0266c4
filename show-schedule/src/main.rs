use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use show_schedule::app::{RunOptions, run};
use show_schedule::config::DEFAULT_CONFIG_PATH;
use show_schedule::output::{DEFAULT_OUTPUT_PATH, DEFAULT_PUBLISHED_PATH};

/// Build a horse show schedule for a list of riders.
#[derive(Debug, Parser)]
#[command(name = "show-schedule", version)]
struct Cli {
    /// Rider names to look up; replaces `riderNames` from the config file
    riders: Vec<String>,

    /// JSON config file with showId, riderNames and classMapping
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Where to write the schedule
    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    output: PathBuf,

    /// Second copy of the schedule, for the published site
    #[arg(long, default_value = DEFAULT_PUBLISHED_PATH)]
    publish: PathBuf,

    /// Show API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Pause between rider requests, in milliseconds
    #[arg(long, default_value_t = 500)]
    pacing_ms: u64,

    /// Per-request timeout, in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Serve saved responses from this directory instead of the live API
    #[arg(long)]
    mock_dir: Option<PathBuf>,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            riders: cli.riders,
            config_path: cli.config,
            output_path: cli.output,
            published_path: cli.publish,
            base_url: cli.base_url,
            pacing: Duration::from_millis(cli.pacing_ms),
            timeout_secs: cli.timeout_secs,
            mock_dir: cli.mock_dir,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the schedule
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    match run(&RunOptions::from(Cli::parse())).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
