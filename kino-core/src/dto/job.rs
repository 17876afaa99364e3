//! Job DTOs for the job service API

use serde::{Deserialize, Serialize};

use crate::domain::input::InputData;
use crate::domain::job::JobKind;

/// Request to create a new generation job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateJob {
    pub kind: JobKind,
    pub service_id: i64,
    pub input_data: InputData,
}
