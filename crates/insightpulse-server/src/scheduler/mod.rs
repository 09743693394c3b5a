//! Background job fired on a fixed interval.
//!
//! Each run sleeps a random delay, fails with the configured probability and
//! records throughput, failures, duration and an availability gauge that
//! reflects the outcome of the latest run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;
use tokio::task::JoinHandle;

use insightpulse_core::error::{InsightError, Result};
use insightpulse_core::metrics::{Counter, Gauge, Timer};
use insightpulse_core::MeterRegistry;

use crate::chance::Chance;
use crate::config::SchedulerSection;

pub struct ScheduledJob {
    chance: Arc<dyn Chance>,
    failure_rate: f64,
    max_delay_ms: u64,
    throughput: Counter,
    failures: Counter,
    duration: Timer,
    availability: Gauge,
}

impl ScheduledJob {
    pub fn new(
        registry: &MeterRegistry,
        chance: Arc<dyn Chance>,
        cfg: &SchedulerSection,
    ) -> Result<Self> {
        let throughput = registry.counter(
            "scheduled_job_throughput_total",
            "Total number of scheduled jobs processed",
            &[],
        )?;
        let failures = registry.counter(
            "scheduled_job_failures_total",
            "Number of failed scheduled job executions",
            &[],
        )?;
        let duration = registry.timer(
            "scheduled_job_execution_duration_seconds",
            "Time taken to execute scheduled jobs",
            &[],
        )?;
        let availability = registry.gauge(
            "job_availability",
            "1 if job is available, 0 if unavailable",
            &[],
        )?;
        availability.set(1);

        Ok(Self {
            chance,
            failure_rate: cfg.failure_rate,
            max_delay_ms: cfg.max_delay_ms,
            throughput,
            failures,
            duration,
            availability,
        })
    }

    /// One execution. Metrics are recorded whatever the outcome.
    pub async fn run_once(&self) -> Result<()> {
        let started = Instant::now();
        tracing::info!("running scheduled job");

        let delay_ms = self.chance.pick_ms(0, self.max_delay_ms);
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let result = if self.chance.hits(self.failure_rate) {
            self.failures.inc();
            self.availability.set(0);
            tracing::error!("scheduled job failed");
            Err(InsightError::simulated("Simulated job failure"))
        } else {
            self.availability.set(1);
            tracing::info!(delay_ms, "scheduled job executed successfully");
            Ok(())
        };

        self.throughput.inc();
        self.duration.record(started.elapsed());
        result
    }
}

/// Run `job` every `every` until `shutdown` flips to true or its sender drops.
pub fn spawn(
    job: ScheduledJob,
    every: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = job.run_once().await {
                        tracing::debug!(error = %e, "scheduled run recorded as failure");
                    }
                }
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }
        tracing::info!("scheduler stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chance::Fixed;

    fn job(reg: &MeterRegistry, hit: bool) -> ScheduledJob {
        let cfg = SchedulerSection {
            max_delay_ms: 0,
            ..SchedulerSection::default()
        };
        ScheduledJob::new(reg, Arc::new(Fixed { hit, flip: false }), &cfg).unwrap()
    }

    #[tokio::test]
    async fn failed_run_still_counts_throughput() {
        let reg = MeterRegistry::new();
        let job = job(&reg, true);

        assert!(job.run_once().await.is_err());
        assert_eq!(job.throughput.value(), 1);
        assert_eq!(job.failures.value(), 1);
        assert_eq!(job.duration.count(), 1);
        assert_eq!(job.availability.value(), 0);
    }

    #[tokio::test]
    async fn successful_run_restores_availability() {
        let reg = MeterRegistry::new();
        let job = job(&reg, false);
        job.availability.set(0);

        job.run_once().await.unwrap();
        assert_eq!(job.availability.value(), 1);
        assert_eq!(job.failures.value(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn spawned_loop_ticks_until_shutdown() {
        let reg = MeterRegistry::new();
        let throughput = reg
            .counter("scheduled_job_throughput_total", "", &[])
            .unwrap();
        let (tx, rx) = watch::channel(false);
        let handle = spawn(job(&reg, false), Duration::from_secs(1), rx);

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        // ticks at 0s, 1s and 2s
        assert_eq!(throughput.value(), 3);
    }
}
