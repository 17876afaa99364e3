//! Kino Tracker
//!
//! Submits generation jobs to the remote job service and keeps polling them
//! until they finish or their retry budget runs out.
//!
//! Architecture:
//! - Configuration: polling interval and retry budgets, from environment or defaults
//! - Store: in-memory view of known jobs, the tracked set and attempt counters
//! - Repository: the four remote calls behind a trait, implemented over HTTP
//! - Services: submission, refresh and the single-job polling step
//! - Scheduler: recurring task that polls every tracked job once per tick

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;
pub mod service;
pub mod store;

pub use config::TrackerConfig;
pub use error::SubmitError;
pub use repository::JobRepository;
pub use scheduler::{PollScheduler, SchedulerHandle};
pub use service::{PollOutcome, TickSummary, Tracker};
pub use store::TaskStore;
