//! InsightPulse server library entry.
//!
//! This crate wires the simulated services, HTTP handlers, observability
//! middleware, and the background scheduler into a single axum application.
//! It is consumed by the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod chance;
pub mod config;
pub mod handlers;
pub mod obs;
pub mod ops;
pub mod router;
pub mod scheduler;
pub mod services;
