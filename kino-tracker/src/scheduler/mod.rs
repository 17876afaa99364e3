//! Scheduler layer
//!
//! Drives the tracker's polling pass on a fixed interval. The loop is an
//! explicit task with a start/stop lifecycle, owned by whoever owns the tracker.

pub mod poller;

pub use poller::{PollScheduler, SchedulerHandle};
