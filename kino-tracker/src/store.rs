//! Task store
//!
//! In-memory view of every known job, the subset being polled (the tracked set)
//! and the per-job attempt counters. Submission, refresh and polling are the
//! only writers; views read snapshots through `list_all` and `get`.
//!
//! Every operation takes the lock once, so each one is atomic with respect to
//! the others. Operations on unknown ids are no-ops.

use chrono::Utc;
use kino_core::domain::job::{Job, JobStatus};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct StoreState {
    /// Known jobs in server order, new ones appended
    jobs: Vec<Job>,
    tracked: BTreeSet<String>,
    /// Successful polls since the id was last tracked
    attempts: HashMap<String, u32>,
    /// Consecutive failed polls since the last successful one
    transport_failures: HashMap<String, u32>,
}

impl StoreState {
    fn position(&self, id: &str) -> Option<usize> {
        self.jobs.iter().position(|job| job.id == id)
    }

    fn start_tracking(&mut self, id: &str) {
        self.tracked.insert(id.to_string());
        self.attempts.insert(id.to_string(), 0);
        self.transport_failures.remove(id);
    }

    fn stop_tracking(&mut self, id: &str) {
        self.tracked.remove(id);
        self.attempts.remove(id);
        self.transport_failures.remove(id);
    }

    /// A record that is finished or given up on only accepts a terminal status
    fn apply_update(&mut self, job: Job) {
        match self.position(&job.id) {
            Some(idx) => {
                let current = &self.jobs[idx];
                let settled = current.is_terminal() || current.status == JobStatus::Stalled;
                if !settled || job.is_terminal() {
                    self.jobs[idx] = job;
                }
            }
            None => self.jobs.push(job),
        }
    }

    fn stop_and_mark_stalled(&mut self, id: &str) {
        self.stop_tracking(id);
        let Some(idx) = self.position(id) else {
            return;
        };

        let job = &mut self.jobs[idx];
        if job.is_active() {
            job.status = JobStatus::Stalled;
            job.updated_at = Utc::now();
        }
    }
}

/// Whether a tracked job may be polled again
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollBudget {
    NotTracked,
    /// The attempt budget was spent; the job was untracked and marked stalled
    Exhausted { attempts: u32 },
    Available,
}

/// What the store did with a successful status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusRecord {
    /// The id was no longer tracked; only the record was applied
    Late,
    /// The check counted against the attempt budget. A terminal status also
    /// removed the id from the tracked set.
    Counted { attempts: u32 },
}

/// What the store did with a failed status check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureRecord {
    /// The id was no longer tracked; nothing changed
    Untracked,
    Counted { failures: u32 },
    /// The failure budget was spent; the job was untracked and marked stalled
    Stalled { failures: u32 },
}

/// Shared handle to the task store
///
/// Cloning is cheap; all clones see the same state.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    state: Arc<Mutex<StoreState>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    // =============================================================================
    // Reads
    // =============================================================================

    /// Snapshot of every known job, in server order
    pub fn list_all(&self) -> Vec<Job> {
        self.state().jobs.clone()
    }

    pub fn get(&self, id: &str) -> Option<Job> {
        let state = self.state();
        state.position(id).map(|idx| state.jobs[idx].clone())
    }

    pub fn len(&self) -> usize {
        self.state().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().jobs.is_empty()
    }

    pub fn is_tracked(&self, id: &str) -> bool {
        self.state().tracked.contains(id)
    }

    /// Tracked ids in sorted order
    pub fn tracked_ids(&self) -> Vec<String> {
        self.state().tracked.iter().cloned().collect()
    }

    pub fn tracked_count(&self) -> usize {
        self.state().tracked.len()
    }

    /// Current attempt counter; zero when none exists
    pub fn attempts(&self, id: &str) -> u32 {
        self.state().attempts.get(id).copied().unwrap_or(0)
    }

    pub fn transport_failures(&self, id: &str) -> u32 {
        self.state().transport_failures.get(id).copied().unwrap_or(0)
    }

    // =============================================================================
    // Mutations
    // =============================================================================

    /// Replaces the whole job list after a full listing
    ///
    /// Active jobs that are not yet tracked start tracking with a fresh counter.
    /// Ids already tracked keep their counters. Tracked ids that are no longer
    /// active, or no longer listed, stop being tracked.
    pub fn replace_all(&self, jobs: Vec<Job>) {
        let mut state = self.state();

        let active: HashSet<String> = jobs
            .iter()
            .filter(|job| job.is_active())
            .map(|job| job.id.clone())
            .collect();

        let stale: Vec<String> = state
            .tracked
            .iter()
            .filter(|id| !active.contains(*id))
            .cloned()
            .collect();
        for id in &stale {
            state.stop_tracking(id);
        }

        for id in &active {
            if !state.tracked.contains(id) {
                state.start_tracking(id);
            }
        }

        state.jobs = jobs;
    }

    /// Replaces the record with the same id in place, or appends it
    pub fn upsert(&self, job: Job) {
        let mut state = self.state();
        match state.position(&job.id) {
            Some(idx) => state.jobs[idx] = job,
            None => state.jobs.push(job),
        }
    }

    /// Adds `id` to the tracked set and resets its counters to zero
    pub fn track(&self, id: &str) {
        self.state().start_tracking(id);
    }

    /// Removes `id` from the tracked set and resets its counters
    pub fn untrack(&self, id: &str) {
        self.state().stop_tracking(id);
    }

    /// Increments and returns the attempt counter for `id`
    pub fn increment_attempt(&self, id: &str) -> u32 {
        let mut state = self.state();
        let counter = state.attempts.entry(id.to_string()).or_insert(0);
        *counter += 1;
        *counter
    }

    // =============================================================================
    // Polling steps
    // =============================================================================

    /// Checks the attempt budget before a status request
    ///
    /// A job whose budget is spent is untracked, and its record is marked
    /// stalled if it was still active.
    pub fn check_poll_budget(&self, id: &str, max_attempts: u32) -> PollBudget {
        let mut state = self.state();
        if !state.tracked.contains(id) {
            return PollBudget::NotTracked;
        }

        let attempts = state.attempts.get(id).copied().unwrap_or(0);
        if attempts >= max_attempts {
            state.stop_and_mark_stalled(id);
            return PollBudget::Exhausted { attempts };
        }
        PollBudget::Available
    }

    /// Records a successful status check
    ///
    /// The record is applied whether or not the id is still tracked, but a
    /// finished or stalled record is never replaced by a non-terminal one.
    /// Counters only change for tracked ids.
    pub fn record_status(&self, job: Job) -> StatusRecord {
        let mut state = self.state();
        let id = job.id.clone();
        let terminal = job.is_terminal();
        state.apply_update(job);

        if !state.tracked.contains(&id) {
            return StatusRecord::Late;
        }

        state.transport_failures.remove(&id);
        let counter = state.attempts.entry(id.clone()).or_insert(0);
        *counter += 1;
        let attempts = *counter;

        if terminal {
            state.stop_tracking(&id);
        }
        StatusRecord::Counted { attempts }
    }

    /// Records a failed status check against the consecutive failure budget
    pub fn record_failure(&self, id: &str, max_failures: u32) -> FailureRecord {
        let mut state = self.state();
        if !state.tracked.contains(id) {
            return FailureRecord::Untracked;
        }

        let counter = state.transport_failures.entry(id.to_string()).or_insert(0);
        *counter += 1;
        let failures = *counter;

        if failures >= max_failures {
            state.stop_and_mark_stalled(id);
            FailureRecord::Stalled { failures }
        } else {
            FailureRecord::Counted { failures }
        }
    }
}
