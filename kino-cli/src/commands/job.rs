//! Job command handlers
//!
//! Listing, viewing and watching jobs already known to the service.

use anyhow::{Context, Result};
use colored::*;
use kino_tracker::{PollScheduler, Tracker};
use std::sync::Arc;
use tracing::debug;

use crate::config::Config;
use crate::id_resolver::resolve_job_id;
use crate::output::{print_job_details, print_job_summary};

/// List all jobs
pub async fn list_jobs(config: &Config) -> Result<()> {
    let client = config.client()?;
    let jobs = client.list_jobs().await.context("Failed to list jobs")?;

    if jobs.is_empty() {
        println!("{}", "No jobs found.".yellow());
    } else {
        println!("{}", format!("Found {} job(s):", jobs.len()).bold());
        println!();
        for job in &jobs {
            print_job_summary(job);
        }
    }

    Ok(())
}

/// Get and display a single job
pub async fn get_job(config: &Config, id: &str) -> Result<()> {
    let client = config.client()?;
    let job_id = resolve_job_id(&client, id).await?;

    let job = client
        .get_job(&job_id)
        .await
        .with_context(|| format!("Failed to fetch job {}", job_id))?;

    print_job_details(&job);
    Ok(())
}

/// Load every job and poll the unfinished ones until none are left
pub async fn watch_jobs(config: &Config) -> Result<()> {
    let tracker_config = config.tracker_config()?;
    let client = config.client()?;
    let tracker = Tracker::new(tracker_config, Arc::new(client));

    tracker.refresh().await.context("Failed to load jobs")?;

    let watched = tracker.store().tracked_ids();
    if watched.is_empty() {
        println!("{}", "No jobs in progress.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Watching {} job(s) in progress...", watched.len()).bold()
    );
    let passes = PollScheduler::new(tracker.clone()).run_until_idle().await;
    debug!("Watch finished after {} polling pass(es)", passes);

    println!();
    for id in &watched {
        if let Some(job) = tracker.get(id) {
            print_job_summary(&job);
        }
    }

    Ok(())
}
