use std::sync::Arc;
use std::time::{Duration, Instant};

use insightpulse_core::error::{InsightError, Result};
use insightpulse_core::metrics::{Counter, Timer};
use insightpulse_core::Instrumentation;

use crate::chance::Chance;
use crate::config::{DelayRange, SimulationSection};

/// Simulated job with a configurable failure rate. Failures are decided
/// before any work happens; successful runs sleep for a random delay.
pub struct DummyService {
    instr: Instrumentation,
    chance: Arc<dyn Chance>,
    failure_rate: f64,
    delay: DelayRange,
    throughput: Counter,
    failures: Counter,
    duration: Timer,
}

impl DummyService {
    pub const CLASS: &'static str = "DummyService";

    pub fn new(
        instr: Instrumentation,
        chance: Arc<dyn Chance>,
        sim: &SimulationSection,
    ) -> Result<Self> {
        let reg = instr.registry();
        let throughput =
            reg.counter("dummy_job_throughput_total", "Total dummy jobs executed", &[])?;
        let failures = reg.counter("dummy_job_failures_total", "Total dummy job failures", &[])?;
        let duration = reg.timer(
            "dummy_job_execution_duration_seconds",
            "Duration of dummy job execution",
            &[],
        )?;

        Ok(Self {
            instr,
            chance,
            failure_rate: sim.dummy_failure_rate,
            delay: sim.dummy_delay_ms,
            throughput,
            failures,
            duration,
        })
    }

    pub async fn run_job(&self) -> Result<()> {
        self.instr
            .observe(Self::CLASS, "run_job", async {
                let started = Instant::now();

                if self.chance.hits(self.failure_rate) {
                    self.failures.inc();
                    tracing::error!("dummy job failed");
                    return Err(InsightError::simulated("Simulated job failure"));
                }

                self.throughput.inc();

                let delay_ms = self.chance.pick_ms(self.delay.min, self.delay.max);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;

                self.duration.record(started.elapsed());
                tracing::info!(delay_ms, "dummy job executed");
                Ok(())
            })
            .await
    }
}
