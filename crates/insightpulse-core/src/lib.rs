//! InsightPulse core: error types, the in-process metrics registry, and the
//! instrumentation wrapper used around service operations.
//!
//! This crate carries no HTTP or runtime dependencies so the registry can be
//! shared by the server, the scheduler, and tests alike.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here outside of tests.
//! All fallible paths surface as `InsightError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod error;
pub mod instrument;
pub mod metrics;

/// Shared result type.
pub use error::{InsightError, Result};
pub use instrument::Instrumentation;
pub use metrics::MeterRegistry;
