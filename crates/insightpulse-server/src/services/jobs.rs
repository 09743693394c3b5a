use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use insightpulse_core::error::{InsightError, Result};
use insightpulse_core::metrics::{Counter, Gauge, Timer};
use insightpulse_core::Instrumentation;

use crate::chance::Chance;
use crate::config::{DelayRange, SimulationSection};

/// Outcome of an inventory sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InventoryStatus {
    Available,
    Unavailable,
}

impl InventoryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InventoryStatus::Available => "AVAILABLE",
            InventoryStatus::Unavailable => "UNAVAILABLE",
        }
    }

    /// Value stored in the availability gauge.
    pub fn gauge_value(self) -> i64 {
        match self {
            InventoryStatus::Available => 1,
            InventoryStatus::Unavailable => 0,
        }
    }
}

impl fmt::Display for InventoryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Simulated business jobs: registrations, reports, payments, inventory sync.
pub struct JobService {
    instr: Instrumentation,
    chance: Arc<dyn Chance>,
    payment_failure_rate: f64,
    report_delay: DelayRange,
    registrations: Counter,
    payment_failures: Counter,
    report_duration: Timer,
    inventory: Gauge,
}

impl JobService {
    pub const CLASS: &'static str = "JobService";

    pub fn new(
        instr: Instrumentation,
        chance: Arc<dyn Chance>,
        sim: &SimulationSection,
    ) -> Result<Self> {
        let reg = instr.registry();
        let registrations = reg.counter(
            "user_registration_throughput_total",
            "Total number of user registrations",
            &[],
        )?;
        let payment_failures = reg.counter(
            "payment_failures_total",
            "Number of failed payment attempts",
            &[],
        )?;
        let report_duration = reg.timer(
            "report_generation_duration_seconds",
            "Time taken to generate reports",
            &[],
        )?;
        let inventory = reg.gauge(
            "inventory_sync_availability",
            "Inventory sync availability: 1 = up, 0 = down",
            &[],
        )?;
        inventory.set(InventoryStatus::Available.gauge_value());

        Ok(Self {
            instr,
            chance,
            payment_failure_rate: sim.payment_failure_rate,
            report_delay: sim.report_delay_ms,
            registrations,
            payment_failures,
            report_duration,
            inventory,
        })
    }

    pub async fn register_user(&self) -> Result<()> {
        self.instr
            .observe(Self::CLASS, "register_user", async {
                tracing::info!("simulating user registration");
                self.registrations.inc();
                Ok(())
            })
            .await
    }

    pub async fn generate_report(&self) -> Result<()> {
        self.instr
            .observe(Self::CLASS, "generate_report", async {
                let started = Instant::now();
                let delay_ms = self.chance.pick_ms(self.report_delay.min, self.report_delay.max);
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                self.report_duration.record(started.elapsed());
                tracing::info!(delay_ms, "report generated");
                Ok(())
            })
            .await
    }

    pub async fn process_payment(&self) -> Result<()> {
        self.instr
            .observe(Self::CLASS, "process_payment", async {
                if self.chance.hits(self.payment_failure_rate) {
                    self.payment_failures.inc();
                    tracing::error!("payment job failed");
                    return Err(InsightError::simulated("Simulated payment failure"));
                }
                tracing::info!("payment job succeeded");
                Ok(())
            })
            .await
    }

    pub async fn sync_inventory(&self) -> Result<InventoryStatus> {
        self.instr
            .observe(Self::CLASS, "sync_inventory", async {
                let status = if self.chance.flip() {
                    InventoryStatus::Available
                } else {
                    InventoryStatus::Unavailable
                };
                self.inventory.set(status.gauge_value());
                tracing::info!(%status, "inventory sync");
                Ok(status)
            })
            .await
    }

    pub fn inventory_gauge(&self) -> &Gauge {
        &self.inventory
    }
}
