//! Configuration module
//!
//! Turns the global CLI flags into client and tracker settings.

use anyhow::Result;
use kino_client::JobServiceClient;
use kino_tracker::TrackerConfig;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the job service
    pub service_url: String,
    /// Bearer token, if any
    pub token: Option<String>,
    pub poll_interval: Duration,
    pub max_poll_attempts: u32,
}

impl Config {
    /// Tracker settings, validated
    ///
    /// Starts from the `KINO_*` environment variables, then applies the flags.
    pub fn tracker_config(&self) -> Result<TrackerConfig> {
        let tracker = TrackerConfig::new(self.service_url.clone()).with_env_overrides()?;
        let tracker = self.apply(tracker);
        tracker.validate()?;
        Ok(tracker)
    }

    fn apply(&self, mut tracker: TrackerConfig) -> TrackerConfig {
        if let Some(token) = self.token.as_ref().filter(|token| !token.is_empty()) {
            tracker.api_token = Some(token.clone());
        }
        tracker.poll_interval = self.poll_interval;
        tracker.max_poll_attempts = self.max_poll_attempts;
        tracker
    }

    /// Job service client with timeout and token applied
    pub fn client(&self) -> Result<JobServiceClient> {
        kino_tracker::repository::connect(&self.tracker_config()?)
    }
}
