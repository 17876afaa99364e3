//! Error types for job submission

use kino_client::ClientError;
use kino_core::domain::input::InputError;
use kino_core::dto::vet::VetResult;
use thiserror::Error;

/// Result type alias for submission
pub type SubmitResult<T> = std::result::Result<T, SubmitError>;

/// Why a submission did not produce a job
///
/// In every case nothing was stored and nothing is being tracked.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Input parameters were rejected before any request was made
    #[error("invalid job input: {0}")]
    InvalidInput(#[from] InputError),

    /// The job service rejected the job or could not be reached
    #[error("job submission failed: {}", .0.message())]
    Submission(#[source] ClientError),

    /// The prompt was refused by the content policy
    #[error("prompt rejected by content policy: {}", .0.violations.join(", "))]
    PolicyViolation(VetResult),
}

impl SubmitError {
    /// The server's message, when the service answered
    pub fn server_message(&self) -> Option<String> {
        match self {
            Self::Submission(err @ ClientError::ApiError { .. }) => Some(err.message()),
            _ => None,
        }
    }
}

impl From<ClientError> for SubmitError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::PolicyRejected {
                violations,
                safe_alternatives,
                ..
            } => Self::PolicyViolation(VetResult::rejected(violations, safe_alternatives)),
            other => Self::Submission(other),
        }
    }
}
