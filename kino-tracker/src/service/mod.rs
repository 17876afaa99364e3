//! Service layer
//!
//! `Tracker` is the session-owned context object. It ties the task store to a
//! job repository and exposes the only operations that mutate the store:
//! submission, refresh and polling. Views read through `get_all`.

mod polling;
mod refresh;
mod submission;

pub use polling::{PollOutcome, TickSummary};

use kino_core::domain::job::Job;
use std::sync::Arc;

use crate::config::TrackerConfig;
use crate::repository::JobRepository;
use crate::store::TaskStore;

/// Submission and polling coordinator for one session
#[derive(Clone)]
pub struct Tracker {
    store: TaskStore,
    repository: Arc<dyn JobRepository>,
    config: TrackerConfig,
}

impl Tracker {
    /// Creates a tracker with an empty store
    pub fn new(config: TrackerConfig, repository: Arc<dyn JobRepository>) -> Self {
        Self::with_store(config, repository, TaskStore::new())
    }

    /// Creates a tracker around an existing store
    pub fn with_store(
        config: TrackerConfig,
        repository: Arc<dyn JobRepository>,
        store: TaskStore,
    ) -> Self {
        Self {
            store,
            repository,
            config,
        }
    }

    /// Snapshot of every known job
    pub fn get_all(&self) -> Vec<Job> {
        self.store.list_all()
    }

    pub fn get(&self, id: &str) -> Option<Job> {
        self.store.get(id)
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Whether any job is still being polled
    pub fn is_idle(&self) -> bool {
        self.store.tracked_count() == 0
    }
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("store", &self.store)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
