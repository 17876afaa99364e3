//! Job polling
//!
//! One call to `poll_job` advances a tracked job by exactly one status check.
//! A job leaves the tracked set when the service reports a terminal status, or
//! when either retry budget runs out:
//!
//! - successful checks that still report pending/processing count against
//!   `max_poll_attempts`; the budget is checked before the request is made
//! - consecutive failed checks count against `max_transport_failures`
//!
//! Jobs dropped for budget reasons are marked `stalled` in the store. Each step
//! against the store runs under a single lock, so a job untracked while its
//! check is in flight never gets its counters back.

use kino_core::domain::job::{Job, JobStatus};
use tracing::{debug, info, warn};

use super::Tracker;
use crate::store::{FailureRecord, PollBudget, StatusRecord};

/// Result of a single polling step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The id was not in the tracked set; nothing happened
    NotTracked,
    /// The attempt budget was already spent; untracked without a request
    Abandoned { attempts: u32 },
    /// The service reports the job still running
    InProgress { status: JobStatus, attempts: u32 },
    /// The service reports a terminal status; untracked
    Finished { status: JobStatus, attempts: u32 },
    /// The status check failed; the job stays tracked
    TransportError { failures: u32 },
    /// Too many consecutive failed checks; untracked
    Stalled { failures: u32 },
    /// The job was untracked while the check was in flight; the record was
    /// applied without touching the tracked set
    Late { status: JobStatus },
}

/// Aggregate of one polling pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub polled: usize,
    pub in_progress: usize,
    pub finished: usize,
    pub abandoned: usize,
    pub errors: usize,
}

impl TickSummary {
    fn record(&mut self, outcome: &PollOutcome) {
        let counter = match outcome {
            PollOutcome::InProgress { .. } => &mut self.in_progress,
            PollOutcome::Finished { .. } => &mut self.finished,
            PollOutcome::Abandoned { .. } | PollOutcome::Stalled { .. } => &mut self.abandoned,
            PollOutcome::TransportError { .. } => &mut self.errors,
            PollOutcome::NotTracked | PollOutcome::Late { .. } => return,
        };
        *counter += 1;
        self.polled += 1;
    }
}

impl Tracker {
    /// Performs one status check for a tracked job
    ///
    /// Never fails: errors are logged and counted, not propagated. A response
    /// that carries a different job id counts as a failed check.
    pub async fn poll_job(&self, id: &str) -> PollOutcome {
        match self.store.check_poll_budget(id, self.config.max_poll_attempts) {
            PollBudget::NotTracked => {
                debug!("Job {} is not tracked, skipping poll", id);
                return PollOutcome::NotTracked;
            }
            PollBudget::Exhausted { attempts } => {
                warn!(
                    "Stopped polling job {} after {} attempts without a final status",
                    id, attempts
                );
                return PollOutcome::Abandoned { attempts };
            }
            PollBudget::Available => {}
        }

        let reason = match self.repository.get_job(id).await {
            Ok(job) if job.id == id => return self.record_status(job),
            Ok(job) => format!("response carried job id {}", job.id),
            Err(e) => e.to_string(),
        };

        match self
            .store
            .record_failure(id, self.config.max_transport_failures)
        {
            FailureRecord::Untracked => PollOutcome::NotTracked,
            FailureRecord::Counted { failures } => {
                warn!(
                    "Failed to poll job {} ({}/{}): {}",
                    id, failures, self.config.max_transport_failures, reason
                );
                PollOutcome::TransportError { failures }
            }
            FailureRecord::Stalled { failures } => {
                warn!(
                    "Stopped polling job {} after {} consecutive failures: {}",
                    id, failures, reason
                );
                PollOutcome::Stalled { failures }
            }
        }
    }

    fn record_status(&self, job: Job) -> PollOutcome {
        let id = job.id.clone();
        let status = job.status;

        match self.store.record_status(job) {
            StatusRecord::Late => {
                debug!("Applied late status {} for untracked job {}", status, id);
                PollOutcome::Late { status }
            }
            StatusRecord::Counted { attempts } if status.is_terminal() => {
                info!("Job {} finished with status {}", id, status);
                PollOutcome::Finished { status, attempts }
            }
            StatusRecord::Counted { attempts } => {
                debug!("Job {} is {} (attempt {})", id, status, attempts);
                PollOutcome::InProgress { status, attempts }
            }
        }
    }

    /// Polls every tracked job once, concurrently
    ///
    /// Each job gets its own task; there is no ordering across jobs.
    pub async fn poll_tick(&self) -> TickSummary {
        let ids = self.store.tracked_ids();
        let mut handles = Vec::with_capacity(ids.len());

        for id in ids {
            let tracker = self.clone();
            handles.push(tokio::spawn(async move { tracker.poll_job(&id).await }));
        }

        let mut summary = TickSummary::default();
        for handle in handles {
            match handle.await {
                Ok(outcome) => summary.record(&outcome),
                Err(e) => warn!("Poll task panicked: {}", e),
            }
        }

        summary
    }
}
