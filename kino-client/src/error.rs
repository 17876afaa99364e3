//! Error types for the Kino job service client

use kino_core::dto::error::ApiErrorBody;
use kino_core::dto::vet::SafeAlternative;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the job service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The request was refused by the content policy
    #[error("Rejected by content policy (status {status}): {message}")]
    PolicyRejected {
        status: u16,
        message: String,
        violations: Vec<String>,
        safe_alternatives: Vec<SafeAlternative>,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The request could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Build the error for a non-2xx response from its raw body
    ///
    /// A JSON error payload contributes its message and, when it lists
    /// violations, turns the error into a policy rejection. Anything else is
    /// reported verbatim.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) else {
            return Self::api_error(status, fallback_message(body));
        };

        let message = payload
            .text()
            .map(str::to_string)
            .unwrap_or_else(|| fallback_message(body));

        if payload.is_policy_rejection() && (400..500).contains(&status) {
            Self::PolicyRejected {
                status,
                message,
                violations: payload.violations,
                safe_alternatives: payload.safe_alternatives,
            }
        } else {
            Self::api_error(status, message)
        }
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } | Self::PolicyRejected { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::ParseError(_) | Self::InvalidRequest(_) => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }

    /// Message suitable for showing to the user
    pub fn message(&self) -> String {
        match self {
            Self::ApiError { message, .. } | Self::PolicyRejected { message, .. } => {
                message.clone()
            }
            other => other.to_string(),
        }
    }
}

fn fallback_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}
