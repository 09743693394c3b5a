use std::net::SocketAddr;

use insightpulse_core::error::{InsightError, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub simulation: SimulationSection,

    #[serde(default)]
    pub scheduler: SchedulerSection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            simulation: SimulationSection::default(),
            scheduler: SchedulerSection::default(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(InsightError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.simulation.validate()?;
        self.scheduler.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,

    #[serde(default = "default_metrics_path")]
    pub metrics_path: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            metrics_path: default_metrics_path(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if !self.metrics_path.starts_with('/') {
            return Err(InsightError::Config(
                "server.metrics_path must start with '/'".into(),
            ));
        }
        if !is_static_path(&self.metrics_path) {
            return Err(InsightError::Config(format!(
                "server.metrics_path {} must be a static path (segments of [A-Za-z0-9._~-])",
                self.metrics_path
            )));
        }
        if RESERVED_PATHS.contains(&self.metrics_path.as_str()) {
            return Err(InsightError::Config(format!(
                "server.metrics_path {} collides with a built-in route",
                self.metrics_path
            )));
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            InsightError::Config(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

/// Routes served regardless of config.
const RESERVED_PATHS: [&str; 6] = [
    "/execute-dummy-job",
    "/jobs/register-user",
    "/jobs/generate-report",
    "/jobs/process-payment",
    "/jobs/inventory-sync",
    "/healthz",
];

/// `/a/b.c`: no empty segments and no router syntax (`:param`, `*wildcard`, `{..}`).
fn is_static_path(path: &str) -> bool {
    let Some(rest) = path.strip_prefix('/') else {
        return false;
    };
    rest.split('/').all(|seg| {
        !seg.is_empty()
            && seg
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'~' | b'-'))
    })
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}
fn default_metrics_path() -> String {
    "/metrics".into()
}

/// Inclusive delay range in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DelayRange {
    pub min: u64,
    pub max: u64,
}

impl DelayRange {
    pub const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }

    fn validate(&self, field: &str) -> Result<()> {
        if self.min > self.max {
            return Err(InsightError::Config(format!(
                "{field}.min must not exceed {field}.max"
            )));
        }
        if self.max > MAX_DELAY_MS {
            return Err(InsightError::Config(format!(
                "{field}.max must be at most {MAX_DELAY_MS}"
            )));
        }
        Ok(())
    }
}

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationSection {
    #[serde(default = "default_dummy_failure_rate")]
    pub dummy_failure_rate: f64,

    #[serde(default = "default_payment_failure_rate")]
    pub payment_failure_rate: f64,

    #[serde(default = "default_work_delay")]
    pub dummy_delay_ms: DelayRange,

    #[serde(default = "default_work_delay")]
    pub report_delay_ms: DelayRange,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            dummy_failure_rate: default_dummy_failure_rate(),
            payment_failure_rate: default_payment_failure_rate(),
            dummy_delay_ms: default_work_delay(),
            report_delay_ms: default_work_delay(),
        }
    }
}

impl SimulationSection {
    pub fn validate(&self) -> Result<()> {
        check_rate("simulation.dummy_failure_rate", self.dummy_failure_rate)?;
        check_rate("simulation.payment_failure_rate", self.payment_failure_rate)?;
        self.dummy_delay_ms.validate("simulation.dummy_delay_ms")?;
        self.report_delay_ms.validate("simulation.report_delay_ms")?;
        Ok(())
    }
}

fn default_dummy_failure_rate() -> f64 {
    0.2
}
fn default_payment_failure_rate() -> f64 {
    0.3
}
fn default_work_delay() -> DelayRange {
    DelayRange::new(200, 1000)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchedulerSection {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    #[serde(default = "default_dummy_failure_rate")]
    pub failure_rate: f64,
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_ms: default_interval_ms(),
            max_delay_ms: default_max_delay_ms(),
            failure_rate: default_dummy_failure_rate(),
        }
    }
}

impl SchedulerSection {
    pub fn validate(&self) -> Result<()> {
        if !(100..=3_600_000).contains(&self.interval_ms) {
            return Err(InsightError::Config(
                "scheduler.interval_ms must be between 100 and 3600000".into(),
            ));
        }
        DelayRange::new(0, self.max_delay_ms).validate("scheduler.max_delay_ms")?;
        check_rate("scheduler.failure_rate", self.failure_rate)
    }
}

fn default_enabled() -> bool {
    true
}
fn default_interval_ms() -> u64 {
    1000
}
fn default_max_delay_ms() -> u64 {
    500
}

fn check_rate(field: &str, rate: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&rate) {
        return Err(InsightError::Config(format!(
            "{field} must be between 0.0 and 1.0"
        )));
    }
    Ok(())
}
