//! Job-related API endpoints

use crate::JobServiceClient;
use crate::error::Result;
use kino_core::domain::job::Job;
use kino_core::dto::job::CreateJob;
use kino_core::dto::vet::{VetRequest, VetResult};

impl JobServiceClient {
    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Create a new generation job
    ///
    /// Returns the created record, normally `pending`, carrying the id assigned
    /// by the service.
    pub async fn create_job(&self, req: CreateJob) -> Result<Job> {
        let request = self.client.post(self.url("/jobs")).json(&req);
        let response = self.authorize(request).send().await?;

        self.handle_response(response).await
    }

    /// List all jobs belonging to the caller
    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let request = self.client.get(self.url("/jobs"));
        let response = self.authorize(request).send().await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    pub async fn get_job(&self, job_id: &str) -> Result<Job> {
        let request = self.client.get(self.resource_url("/jobs", job_id)?);
        let response = self.authorize(request).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Content Policy
    // =============================================================================

    /// Pre-screen a prompt against the content policy
    ///
    /// Only video submissions go through this check.
    pub async fn vet_prompt(&self, prompt: &str) -> Result<VetResult> {
        let request = self.client.post(self.url("/jobs/vet")).json(&VetRequest {
            prompt: prompt.to_string(),
        });
        let response = self.authorize(request).send().await?;

        self.handle_response(response).await
    }
}
