//! Job submission
//!
//! Creates a job on the service and starts tracking it. Video prompts are
//! vetted first unless the check is disabled in the configuration.

use kino_core::domain::input::{ImageInput, InputData, VideoInput};
use kino_core::domain::job::{Job, JobKind};
use kino_core::dto::job::CreateJob;
use tracing::{info, warn};

use super::Tracker;
use crate::error::{SubmitError, SubmitResult};

impl Tracker {
    /// Submits a job and starts polling it
    ///
    /// On success the created record is stored and its id tracked with a fresh
    /// counter. On any error nothing is stored; submission is never retried.
    pub async fn submit(
        &self,
        kind: JobKind,
        service_id: i64,
        input_data: InputData,
    ) -> SubmitResult<Job> {
        if self.requires_vet(kind) {
            let prompt = input_data
                .get("prompt")
                .and_then(|p| p.as_str())
                .unwrap_or_default();

            let verdict = self
                .repository
                .vet_prompt(prompt)
                .await
                .map_err(SubmitError::Submission)?;

            if !verdict.allowed {
                warn!(
                    "Prompt rejected by content policy: {}",
                    verdict.violations.join(", ")
                );
                return Err(SubmitError::PolicyViolation(verdict));
            }
        }

        let job = self
            .repository
            .create_job(CreateJob {
                kind,
                service_id,
                input_data,
            })
            .await
            .inspect_err(|e| warn!("Failed to create {} job: {}", kind, e))?;

        info!("Created {} job {} (status: {})", kind, job.id, job.status);

        let id = job.id.clone();
        self.store.upsert(job.clone());
        self.store.track(&id);

        Ok(job)
    }

    /// Validates typed video input and submits it
    pub async fn submit_video(&self, service_id: i64, input: VideoInput) -> SubmitResult<Job> {
        let input_data = input.into_input_data()?;
        self.submit(JobKind::Video, service_id, input_data).await
    }

    /// Validates typed image input and submits it
    pub async fn submit_image(&self, service_id: i64, input: ImageInput) -> SubmitResult<Job> {
        let input_data = input.into_input_data()?;
        self.submit(JobKind::Image, service_id, input_data).await
    }

    fn requires_vet(&self, kind: JobKind) -> bool {
        kind == JobKind::Video && self.config.vet_video_prompts
    }
}
