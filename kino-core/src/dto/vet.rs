//! Content policy vet check DTOs

use serde::{Deserialize, Serialize};

/// Request to pre-screen a prompt against the content policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VetRequest {
    pub prompt: String,
}

/// Outcome of a vet check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VetResult {
    pub allowed: bool,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub safe_alternatives: Vec<SafeAlternative>,
}

impl VetResult {
    pub fn allowed() -> Self {
        Self {
            allowed: true,
            violations: Vec::new(),
            safe_alternatives: Vec::new(),
        }
    }

    pub fn rejected(violations: Vec<String>, safe_alternatives: Vec<SafeAlternative>) -> Self {
        Self {
            allowed: false,
            violations,
            safe_alternatives,
        }
    }
}

/// A rewritten prompt the policy service considers acceptable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafeAlternative {
    pub prompt: String,
    #[serde(default)]
    pub notes: String,
}
