//! Top-level facade crate for InsightPulse.
//!
//! Re-exports the metrics core and the server library so users can depend on a single crate.

pub mod core {
    pub use insightpulse_core::*;
}

pub mod server {
    pub use insightpulse_server::*;
}
