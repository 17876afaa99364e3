//! Error payloads returned by the job service

use serde::{Deserialize, Serialize};

use crate::dto::vet::SafeAlternative;

/// JSON body of a non-2xx job service response
///
/// Different endpoints put the human-readable text under `message`, `error` or
/// `detail`; policy rejections also carry violations and alternatives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub safe_alternatives: Vec<SafeAlternative>,
}

impl ApiErrorBody {
    /// First non-empty message field
    pub fn text(&self) -> Option<&str> {
        [&self.message, &self.error, &self.detail]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }

    pub fn is_policy_rejection(&self) -> bool {
        !self.violations.is_empty()
    }
}
