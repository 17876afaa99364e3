//! HTTP implementation of the job repository

use async_trait::async_trait;
use kino_client::{JobServiceClient, Result};
use kino_core::domain::job::Job;
use kino_core::dto::job::CreateJob;
use kino_core::dto::vet::VetResult;
use reqwest::Client;

use super::JobRepository;
use crate::config::TrackerConfig;

/// Builds a job service client from the tracker configuration
///
/// Applies the configured request timeout and bearer token.
pub fn connect(config: &TrackerConfig) -> anyhow::Result<JobServiceClient> {
    let http = Client::builder().timeout(config.request_timeout).build()?;

    let client = JobServiceClient::with_client(config.service_url.clone(), http);
    Ok(match &config.api_token {
        Some(token) => client.with_token(token.clone()),
        None => client,
    })
}

#[async_trait]
impl JobRepository for JobServiceClient {
    async fn create_job(&self, req: CreateJob) -> Result<Job> {
        JobServiceClient::create_job(self, req).await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        JobServiceClient::list_jobs(self).await
    }

    async fn get_job(&self, job_id: &str) -> Result<Job> {
        JobServiceClient::get_job(self, job_id).await
    }

    async fn vet_prompt(&self, prompt: &str) -> Result<VetResult> {
        JobServiceClient::vet_prompt(self, prompt).await
    }
}
