//! Kino HTTP Client
//!
//! A small, typed HTTP client for the remote generation job service.
//!
//! The tracker uses it to create jobs, list them, poll them by id and pre-screen
//! prompts against the content policy; the CLI uses it for one-off lookups.
//!
//! # Example
//!
//! ```no_run
//! use kino_client::JobServiceClient;
//! use kino_core::domain::input::VideoInput;
//! use kino_core::domain::job::JobKind;
//! use kino_core::dto::job::CreateJob;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JobServiceClient::new("http://localhost:8000/api");
//!
//!     let job = client.create_job(CreateJob {
//!         kind: JobKind::Video,
//!         service_id: 1,
//!         input_data: VideoInput::new("A cat playing in a garden").into_input_data()?,
//!     }).await?;
//!
//!     println!("Created job: {}", job.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;

// Re-export commonly used types
pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// HTTP client for the job service API
#[derive(Debug, Clone)]
pub struct JobServiceClient {
    /// Base URL of the job service (e.g., "http://localhost:8000/api")
    base_url: String,
    /// Bearer token sent with every request, if set
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl JobServiceClient {
    /// Create a new job service client
    ///
    /// # Example
    /// ```
    /// use kino_client::JobServiceClient;
    ///
    /// let client = JobServiceClient::new("http://localhost:8000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client around a preconfigured reqwest Client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use kino_client::JobServiceClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = JobServiceClient::with_client("http://localhost:8000/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the job service
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// URL of a single resource under `path`; the id is percent-encoded as one
    /// path segment
    fn resource_url(&self, path: &str, id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url(path))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest(format!("Base URL cannot hold a path: {}", self.base_url)))?
            .push(id);
        Ok(url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body on success
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("Job service returned {}: {}", status, body);
            return Err(ClientError::from_response_body(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}
