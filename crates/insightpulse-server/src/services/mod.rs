//! Simulated services.
//!
//! Each public operation runs through [`Instrumentation::observe`] so every
//! call emits throughput, success/failure and duration metrics on top of the
//! service's own meters.
//!
//! [`Instrumentation::observe`]: insightpulse_core::Instrumentation::observe

pub mod dummy;
pub mod jobs;

pub use dummy::DummyService;
pub use jobs::{InventoryStatus, JobService};
