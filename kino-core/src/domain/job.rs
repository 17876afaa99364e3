//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generation job record
///
/// Structure returned by the job service on creation, listing and status checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub kind: JobKind,
    #[serde(default)]
    pub service_id: Option<i64>,
    pub status: JobStatus,
    #[serde(default)]
    pub input_data: HashMap<String, serde_json::Value>,
    #[serde(default, alias = "output_data")]
    pub output: Option<serde_json::Value>,
    #[serde(default)]
    pub error_message: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Creates a pending job with empty input, stamped now
    pub fn new(id: impl Into<String>, kind: JobKind) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            service_id: None,
            status: JobStatus::Pending,
            input_data: HashMap::new(),
            output: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the same job with a different status
    pub fn with_status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Prompt text from the input parameters, if any
    pub fn prompt(&self) -> Option<&str> {
        self.input_data.get("prompt").and_then(|v| v.as_str())
    }
}

/// What a job generates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobKind {
    Video,
    Image,
}

impl JobKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobKind::Video => "video",
            JobKind::Image => "image",
        }
    }
}

impl std::fmt::Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Job lifecycle status
///
/// The server moves a job through `Pending -> Processing -> Completed | Failed`.
/// `Stalled` is never sent by the server: the tracker assigns it locally when it
/// gives up polling a job that never reached a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Stalled,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Processing => "processing",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Stalled => "stalled",
        }
    }

    /// Server-confirmed end state; no further updates are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Still being worked on server-side and therefore worth polling.
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Pending | JobStatus::Processing)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(JobStatus::Pending.is_active());
        assert!(JobStatus::Processing.is_active());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Stalled.is_active());
        assert!(!JobStatus::Stalled.is_terminal());
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "kind": "video",
            "status": "pending"
        }))
        .unwrap();

        assert_eq!(job.id, "abc123");
        assert_eq!(job.kind, JobKind::Video);
        assert_eq!(job.status, JobStatus::Pending);
        assert!(job.input_data.is_empty());
        assert!(job.output.is_none());
    }

    #[test]
    fn test_deserialize_completed_with_output_alias() {
        let job: Job = serde_json::from_value(serde_json::json!({
            "id": "abc123",
            "kind": "image",
            "service_id": 4,
            "status": "completed",
            "input_data": { "prompt": "a lighthouse at dusk" },
            "output_data": { "url": "https://cdn.example.com/abc123.png" },
            "created_at": "2025-01-01T00:00:00Z",
            "updated_at": "2025-01-01T00:01:00Z"
        }))
        .unwrap();

        assert_eq!(job.service_id, Some(4));
        assert_eq!(job.prompt(), Some("a lighthouse at dusk"));
        assert_eq!(
            job.output.as_ref().and_then(|o| o.get("url")).and_then(|u| u.as_str()),
            Some("https://cdn.example.com/abc123.png")
        );
        assert!(job.is_terminal());
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&JobStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(serde_json::to_string(&JobKind::Image).unwrap(), "\"image\"");
    }
}
