//! Core domain types
//!
//! These types mirror the records returned by the remote job service and are
//! shared between the HTTP client, the tracker and the CLI.

pub mod input;
pub mod job;
