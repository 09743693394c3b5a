//! Service config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use insightpulse_core::error::{InsightError, Result};

pub use schema::{AppConfig, DelayRange, SchedulerSection, ServerSection, SimulationSection};

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "INSIGHTPULSE_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "insightpulse.yaml";

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| InsightError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s)
        .map_err(|e| InsightError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the file named by `INSIGHTPULSE_CONFIG` (or the default path).
/// A missing file yields the built-in defaults; a malformed one is an error.
pub fn load_or_default() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if !Path::new(&path).exists() {
        tracing::warn!(%path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }
    tracing::info!(%path, "loading config");
    load_from_file(&path)
}
