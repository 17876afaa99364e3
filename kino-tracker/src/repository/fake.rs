//! In-memory job repository for tests
//!
//! Status checks are scripted per job id; once a script runs out the job
//! reports `processing`. A `Gate` can hold status checks in flight until the
//! test releases them.

use async_trait::async_trait;
use kino_client::{ClientError, Result};
use kino_core::domain::job::{Job, JobKind, JobStatus};
use kino_core::dto::job::CreateJob;
use kino_core::dto::vet::VetResult;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use super::JobRepository;

/// One scripted answer to a status check
#[derive(Debug, Clone)]
pub(crate) enum Step {
    Status(JobStatus),
    Fail(u16),
    /// Answer with this exact record
    Respond(Job),
}

/// Holds every status check until released
#[derive(Debug, Default)]
pub(crate) struct Gate {
    entered: Notify,
    release: Notify,
}

impl Gate {
    /// Waits until a status check is blocked on the gate
    pub(crate) async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets one blocked status check continue
    pub(crate) fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Debug, Default)]
struct FakeState {
    next_ids: VecDeque<String>,
    create_error: Option<(u16, String)>,
    created: Vec<CreateJob>,
    jobs: HashMap<String, Job>,
    listing: Option<Vec<Job>>,
    scripts: HashMap<String, VecDeque<Step>>,
    get_calls: HashMap<String, u32>,
    vet_result: Option<VetResult>,
    vetted: Vec<String>,
    gate: Option<Arc<Gate>>,
}

#[derive(Debug, Default)]
pub(crate) struct FakeRepository {
    state: Mutex<FakeState>,
}

impl FakeRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Id handed out by the next successful create
    pub(crate) fn with_next_id(self, id: &str) -> Self {
        self.state.lock().unwrap().next_ids.push_back(id.to_string());
        self
    }

    pub(crate) fn with_create_error(self, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().create_error = Some((status, body.to_string()));
        self
    }

    pub(crate) fn with_listing(self, jobs: Vec<Job>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            for job in &jobs {
                state.jobs.insert(job.id.clone(), job.clone());
            }
            state.listing = Some(jobs);
        }
        self
    }

    pub(crate) fn with_vet_result(self, result: VetResult) -> Self {
        self.state.lock().unwrap().vet_result = Some(result);
        self
    }

    /// Holds status checks in flight until the returned gate releases them
    pub(crate) fn gated(&self) -> Arc<Gate> {
        let gate = Arc::new(Gate::default());
        self.state.lock().unwrap().gate = Some(gate.clone());
        gate
    }

    pub(crate) fn script(&self, id: &str, steps: impl IntoIterator<Item = Step>) {
        self.state
            .lock()
            .unwrap()
            .scripts
            .entry(id.to_string())
            .or_default()
            .extend(steps);
    }

    pub(crate) fn get_calls(&self, id: &str) -> u32 {
        self.state.lock().unwrap().get_calls.get(id).copied().unwrap_or(0)
    }

    pub(crate) fn created(&self) -> Vec<CreateJob> {
        self.state.lock().unwrap().created.clone()
    }

    pub(crate) fn vetted(&self) -> Vec<String> {
        self.state.lock().unwrap().vetted.clone()
    }
}

#[async_trait]
impl JobRepository for FakeRepository {
    async fn create_job(&self, req: CreateJob) -> Result<Job> {
        let mut state = self.state.lock().unwrap();
        if let Some((status, body)) = &state.create_error {
            return Err(ClientError::from_response_body(*status, body));
        }

        let id = state
            .next_ids
            .pop_front()
            .unwrap_or_else(|| format!("job-{}", state.created.len() + 1));
        let mut job = Job::new(id, req.kind);
        job.service_id = Some(req.service_id);
        job.input_data = req.input_data.clone();

        state.created.push(req);
        state.jobs.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    async fn list_jobs(&self) -> Result<Vec<Job>> {
        let state = self.state.lock().unwrap();
        match &state.listing {
            Some(jobs) => Ok(jobs.clone()),
            None => Err(ClientError::api_error(503, "listing unavailable")),
        }
    }

    async fn get_job(&self, job_id: &str) -> Result<Job> {
        let gate = self.state.lock().unwrap().gate.clone();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        let mut state = self.state.lock().unwrap();
        *state.get_calls.entry(job_id.to_string()).or_insert(0) += 1;

        let step = state
            .scripts
            .get_mut(job_id)
            .and_then(|steps| steps.pop_front())
            .unwrap_or(Step::Status(JobStatus::Processing));

        match step {
            Step::Fail(status) => Err(ClientError::api_error(status, "scripted failure")),
            Step::Respond(job) => Ok(job),
            Step::Status(status) => {
                let base = state
                    .jobs
                    .get(job_id)
                    .cloned()
                    .unwrap_or_else(|| Job::new(job_id, JobKind::Video));
                let mut job = base.with_status(status);
                match status {
                    JobStatus::Completed => {
                        job.output = Some(serde_json::json!({
                            "url": format!("https://cdn.example.com/{job_id}.mp4")
                        }));
                    }
                    JobStatus::Failed => job.error_message = Some("render failed".to_string()),
                    _ => {}
                }
                state.jobs.insert(job_id.to_string(), job.clone());
                Ok(job)
            }
        }
    }

    async fn vet_prompt(&self, prompt: &str) -> Result<VetResult> {
        let mut state = self.state.lock().unwrap();
        state.vetted.push(prompt.to_string());
        Ok(state.vet_result.clone().unwrap_or_else(VetResult::allowed))
    }
}
