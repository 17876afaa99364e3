//! ID resolver module
//!
//! Lets users type a short, unambiguous prefix instead of a full job ID.

use anyhow::{Context, Result, anyhow};
use kino_client::JobServiceClient;
use kino_core::domain::job::Job;

/// Resolve a job ID or prefix to a full ID
///
/// Fetches the job list and returns the exact match if there is one, else the
/// single job whose ID starts with the input. When nothing matches the input
/// is returned unchanged so the service can answer for it.
///
/// # Errors
/// Returns an error if the prefix is ambiguous or the listing fails.
pub async fn resolve_job_id(client: &JobServiceClient, input: &str) -> Result<String> {
    let jobs = client
        .list_jobs()
        .await
        .context("Failed to fetch jobs for ID resolution")?;

    match_prefix(&jobs, input)
}

fn match_prefix(jobs: &[Job], input: &str) -> Result<String> {
    if jobs.iter().any(|job| job.id == input) {
        return Ok(input.to_string());
    }

    let prefix = input.to_lowercase();
    let matches: Vec<&Job> = jobs
        .iter()
        .filter(|job| job.id.to_lowercase().starts_with(&prefix))
        .collect();

    match matches.len() {
        0 => Ok(input.to_string()),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|job| job.id.as_str()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple jobs: {}",
                input,
                ids.join(", ")
            ))
        }
    }
}
