//! Shared error type across InsightPulse crates.

use thiserror::Error;

/// Meter kinds a metric family can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeterKind {
    Counter,
    Gauge,
    Timer,
}

impl MeterKind {
    /// Prometheus `# TYPE` name.
    pub fn as_str(self) -> &'static str {
        match self {
            MeterKind::Counter => "counter",
            MeterKind::Gauge => "gauge",
            MeterKind::Timer => "histogram",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, InsightError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum InsightError {
    /// Failure injected by a simulated unit of work.
    #[error("simulated failure: {0}")]
    SimulatedFailure(String),
    #[error("invalid config: {0}")]
    Config(String),
    #[error("meter {name} is registered as a {existing:?}, not a {requested:?}")]
    MeterConflict {
        name: String,
        existing: MeterKind,
        requested: MeterKind,
    },
    #[error("internal: {0}")]
    Internal(String),
}

impl InsightError {
    pub fn simulated(msg: impl Into<String>) -> Self {
        InsightError::SimulatedFailure(msg.into())
    }

    /// Stable tag used as the `exception` label on failure metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            InsightError::SimulatedFailure(_) => "SimulatedFailure",
            InsightError::Config(_) => "ConfigError",
            InsightError::MeterConflict { .. } => "MeterConflict",
            InsightError::Internal(_) => "InternalError",
        }
    }

    /// Bare message without the variant prefix, as shown to HTTP clients.
    pub fn message(&self) -> String {
        match self {
            InsightError::SimulatedFailure(m)
            | InsightError::Config(m)
            | InsightError::Internal(m) => m.clone(),
            other => other.to_string(),
        }
    }
}
