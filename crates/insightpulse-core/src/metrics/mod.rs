//! In-process metrics registry.
//!
//! Meters are stored as atomics behind `Arc` handles and grouped into named
//! families backed by `DashMap`. Each family holds one meter kind and a
//! description; series inside a family are keyed by a normalised tag-set.
//! The registry renders everything in Prometheus text exposition format.

mod meters;
mod registry;

pub use meters::{Counter, Gauge, TagSet, Timer, TimerSample, BUCKETS_MILLIS};
pub use registry::MeterRegistry;
