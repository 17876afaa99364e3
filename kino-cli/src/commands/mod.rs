//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod job;
mod submit;
mod vet;

pub use submit::SubmitCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Submit a new generation job
    Submit {
        #[command(subcommand)]
        command: SubmitCommands,
    },
    /// List all jobs
    List,
    /// Get job details
    Get {
        /// Job ID or unambiguous prefix
        id: String,
    },
    /// Check a prompt against the content policy
    Vet {
        /// Prompt text to check
        prompt: String,
    },
    /// Follow every pending or processing job until it finishes
    Watch,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Submit { command } => submit::handle_submit_command(command, config).await,
        Commands::List => job::list_jobs(config).await,
        Commands::Get { id } => job::get_job(config, &id).await,
        Commands::Vet { prompt } => vet::vet_prompt(config, &prompt).await,
        Commands::Watch => job::watch_jobs(config).await,
    }
}
