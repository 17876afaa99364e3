//! Repository layer
//!
//! The job service calls the tracker depends on, behind a trait so the
//! services can be exercised against in-memory fakes. The production
//! implementation is the HTTP `JobServiceClient`.

mod http;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use kino_client::Result;
use kino_core::domain::job::Job;
use kino_core::dto::job::CreateJob;
use kino_core::dto::vet::VetResult;

pub use http::connect;

/// Remote job service operations used by the tracker
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Creates a job and returns the server's record for it
    async fn create_job(&self, req: CreateJob) -> Result<Job>;

    /// Lists every job belonging to the caller
    async fn list_jobs(&self) -> Result<Vec<Job>>;

    /// Fetches the current record for one job
    async fn get_job(&self, job_id: &str) -> Result<Job>;

    /// Runs the content policy pre-check on a prompt
    async fn vet_prompt(&self, prompt: &str) -> Result<VetResult>;
}
