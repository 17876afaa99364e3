//! Data Transfer Objects for the job service API
//!
//! Request bodies sent to the job service and the error/vet payloads it
//! returns. Job records themselves are domain types.

pub mod error;
pub mod job;
pub mod vet;
