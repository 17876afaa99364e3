//! Refresh / bootstrap

use kino_client::Result;
use tracing::info;

use super::Tracker;

impl Tracker {
    /// Replaces the job list with the service's listing
    ///
    /// Every pending or processing job becomes tracked; jobs already tracked
    /// keep their attempt counters. On error the store is left untouched.
    pub async fn refresh(&self) -> Result<()> {
        let jobs = self.repository.list_jobs().await?;
        let total = jobs.len();

        self.store.replace_all(jobs);

        info!(
            "Loaded {} job(s), {} still in progress",
            total,
            self.store.tracked_count()
        );
        Ok(())
    }
}
