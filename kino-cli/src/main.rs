//! Kino CLI
//!
//! Command-line interface for submitting generation jobs and following them
//! until they finish.

mod commands;
mod config;
mod id_resolver;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kino")]
#[command(about = "Submit and track AI video/image generation jobs", long_about = None)]
struct Cli {
    /// Job service URL
    #[arg(long, env = "KINO_SERVICE_URL", default_value = "http://localhost:8000/api")]
    service_url: String,

    /// Bearer token for the job service
    #[arg(long, env = "KINO_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Seconds between status checks when watching jobs
    #[arg(long, env = "KINO_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Status checks per job before giving up
    #[arg(long, env = "KINO_MAX_POLL_ATTEMPTS", default_value_t = 360)]
    max_poll_attempts: u32,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kino=info,kino_tracker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        service_url: cli.service_url,
        token: cli.token,
        poll_interval: Duration::from_secs(cli.poll_interval),
        max_poll_attempts: cli.max_poll_attempts,
    };

    handle_command(cli.command, &config).await
}
