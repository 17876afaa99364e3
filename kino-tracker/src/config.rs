//! Tracker configuration
//!
//! Defines the job service connection settings, the polling interval and the
//! two retry budgets that bound how long a job is polled.

use std::time::Duration;

/// Attempts before a job that never finishes is abandoned
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 360;

/// Consecutive failed status checks before a job is abandoned
pub const DEFAULT_MAX_TRANSPORT_FAILURES: u32 = 30;

/// Tracker configuration
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Job service base URL (e.g., "http://localhost:8000/api")
    pub service_url: String,

    /// Bearer token for the job service
    pub api_token: Option<String>,

    /// How often every tracked job is polled
    pub poll_interval: Duration,

    /// Successful polls allowed before a still-running job is abandoned
    pub max_poll_attempts: u32,

    /// Consecutive transport failures allowed before a job is abandoned
    pub max_transport_failures: u32,

    /// Timeout applied to every request to the job service
    pub request_timeout: Duration,

    /// Run the content policy vet check before submitting video jobs
    pub vet_video_prompts: bool,
}

impl TrackerConfig {
    /// Creates a new configuration with defaults
    pub fn new(service_url: String) -> Self {
        Self {
            service_url,
            api_token: None,
            poll_interval: Duration::from_secs(5),
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
            max_transport_failures: DEFAULT_MAX_TRANSPORT_FAILURES,
            request_timeout: Duration::from_secs(30),
            vet_video_prompts: true,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables:
    /// - KINO_SERVICE_URL (required)
    /// - KINO_API_TOKEN (optional)
    /// - KINO_POLL_INTERVAL (optional, seconds, default: 5)
    /// - KINO_MAX_POLL_ATTEMPTS (optional, default: 360)
    /// - KINO_MAX_TRANSPORT_FAILURES (optional, default: 30)
    /// - KINO_REQUEST_TIMEOUT (optional, seconds, default: 30)
    /// - KINO_VET_VIDEO (optional, true/false, default: true)
    ///
    /// A variable that is set but does not parse is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(env_var)
    }

    /// Same as `from_env`, reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let service_url = lookup("KINO_SERVICE_URL")
            .ok_or_else(|| anyhow::anyhow!("KINO_SERVICE_URL environment variable not set"))?;

        Self::new(service_url).with_overrides(lookup)
    }

    /// Applies the optional `KINO_*` environment variables on top of this
    /// configuration; the service URL is left alone
    pub fn with_env_overrides(self) -> anyhow::Result<Self> {
        self.with_overrides(env_var)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        if let Some(token) = lookup("KINO_API_TOKEN").filter(|token| !token.is_empty()) {
            self.api_token = Some(token);
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "KINO_POLL_INTERVAL")? {
            self.poll_interval = Duration::from_secs(secs);
        }

        if let Some(attempts) = parse_var::<u32>(&lookup, "KINO_MAX_POLL_ATTEMPTS")? {
            self.max_poll_attempts = attempts;
        }

        if let Some(failures) = parse_var::<u32>(&lookup, "KINO_MAX_TRANSPORT_FAILURES")? {
            self.max_transport_failures = failures;
        }

        if let Some(secs) = parse_var::<u64>(&lookup, "KINO_REQUEST_TIMEOUT")? {
            self.request_timeout = Duration::from_secs(secs);
        }

        if let Some(vet) = parse_var::<bool>(&lookup, "KINO_VET_VIDEO")? {
            self.vet_video_prompts = vet;
        }

        Ok(self)
    }

    /// Sets the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.service_url.is_empty() {
            anyhow::bail!("service_url cannot be empty");
        }

        if !self.service_url.starts_with("http://") && !self.service_url.starts_with("https://") {
            anyhow::bail!("service_url must start with http:// or https://");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_poll_attempts == 0 {
            anyhow::bail!("max_poll_attempts must be greater than 0");
        }

        if self.max_transport_failures == 0 {
            anyhow::bail!("max_transport_failures must be greater than 0");
        }

        if self.request_timeout.is_zero() {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api".to_string())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Parses a variable; unset or blank is `None`, anything unparsable an error
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> anyhow::Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };

    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse::<T>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("Invalid value for {}: {:?} ({})", name, raw, e))
}
