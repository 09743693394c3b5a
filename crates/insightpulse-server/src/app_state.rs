//! Shared application state for the InsightPulse server.
//!
//! Owns the metrics registry and the simulated services. Built once at
//! startup; construction errors surface as `Result` instead of panics.

use std::sync::Arc;

use insightpulse_core::error::Result;
use insightpulse_core::{Instrumentation, MeterRegistry};

use crate::chance::{Chance, ThreadChance};
use crate::config::AppConfig;
use crate::services::{DummyService, JobService};

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: AppConfig,
    registry: Arc<MeterRegistry>,
    dummy: DummyService,
    jobs: JobService,
}

impl AppState {
    /// Build application state with thread-RNG driven services.
    pub fn new(cfg: AppConfig) -> Result<Self> {
        Self::with_chance(cfg, Arc::new(ThreadChance))
    }

    /// Build application state with an explicit randomness source.
    pub fn with_chance(cfg: AppConfig, chance: Arc<dyn Chance>) -> Result<Self> {
        let registry = Arc::new(MeterRegistry::new());
        let instr = Instrumentation::new(Arc::clone(&registry));

        let dummy = DummyService::new(instr.clone(), Arc::clone(&chance), &cfg.simulation)?;
        let jobs = JobService::new(instr, chance, &cfg.simulation)?;

        tracing::debug!(
            dummy_failure_rate = cfg.simulation.dummy_failure_rate,
            payment_failure_rate = cfg.simulation.payment_failure_rate,
            "services registered"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                registry,
                dummy,
                jobs,
            }),
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.inner.cfg
    }

    pub fn registry(&self) -> Arc<MeterRegistry> {
        Arc::clone(&self.inner.registry)
    }

    pub fn dummy(&self) -> &DummyService {
        &self.inner.dummy
    }

    pub fn jobs(&self) -> &JobService {
        &self.inner.jobs
    }
}
