//! Poll scheduler
//!
//! Invokes `Tracker::poll_tick` once per interval. A tick that runs longer than
//! the interval delays the next one instead of bursting to catch up.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::service::Tracker;

/// Recurring polling loop for a tracker
pub struct PollScheduler {
    tracker: Tracker,
    interval: Duration,
}

impl PollScheduler {
    /// Creates a scheduler using the tracker's configured poll interval
    pub fn new(tracker: Tracker) -> Self {
        let interval = tracker.config().poll_interval;
        Self { tracker, interval }
    }

    /// Overrides the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Starts the loop as a background task
    ///
    /// The loop keeps ticking while the tracked set is empty, so jobs submitted
    /// later are picked up. Stop it through the returned handle.
    pub fn spawn(self) -> SchedulerHandle {
        info!("Starting poll scheduler (interval: {:?})", self.interval);

        let handle = tokio::spawn(async move {
            let mut ticker = self.ticker();

            loop {
                ticker.tick().await;

                if self.tracker.is_idle() {
                    continue;
                }

                let summary = self.tracker.poll_tick().await;
                debug!(
                    "Polled {} job(s): {} finished, {} abandoned, {} failed",
                    summary.polled, summary.finished, summary.abandoned, summary.errors
                );
            }
        });

        SchedulerHandle { handle }
    }

    /// Ticks until no job is left to poll
    ///
    /// Returns the number of polling passes made.
    pub async fn run_until_idle(&self) -> usize {
        let mut ticker = self.ticker();
        let mut passes = 0;

        loop {
            ticker.tick().await;

            if self.tracker.is_idle() {
                debug!("No tracked jobs left after {} pass(es)", passes);
                return passes;
            }

            self.tracker.poll_tick().await;
            passes += 1;
        }
    }

    fn ticker(&self) -> time::Interval {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    }
}

/// Handle to a running poll scheduler
///
/// Status checks already in flight when the loop stops still complete and are
/// applied to the store.
pub struct SchedulerHandle {
    handle: JoinHandle<()>,
}

impl SchedulerHandle {
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Stops the loop and waits for it to wind down
    pub async fn stop(self) {
        self.handle.abort();
        let _ = self.handle.await;
        info!("Poll scheduler stopped");
    }
}
