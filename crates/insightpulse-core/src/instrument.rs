//! Call instrumentation for service operations.
//!
//! Every unit of work wrapped by [`Instrumentation::observe`] produces:
//! - `job_throughput_total{class,method}` and `service_success_total{class,method}` on success
//! - `service_failures_total{class,method,exception}` on failure
//! - `service_execution_duration_seconds{class,method,outcome,exception}` per outcome
//! - `service_execution_duration_seconds{class,method}` always
//!
//! Errors pass through untouched after being tagged.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::metrics::MeterRegistry;

pub const OUTCOME_SUCCESS: &str = "SUCCESS";
pub const OUTCOME_FAILURE: &str = "FAILURE";
/// `exception` tag value when no error occurred.
pub const NO_EXCEPTION: &str = "None";

const DURATION: &str = "service_execution_duration_seconds";

#[derive(Clone)]
pub struct Instrumentation {
    registry: Arc<MeterRegistry>,
}

impl Instrumentation {
    pub fn new(registry: Arc<MeterRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<MeterRegistry> {
        &self.registry
    }

    /// Run `work`, recording counters and timers tagged with `class`/`method`.
    pub async fn observe<T, F>(&self, class: &str, method: &str, work: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let overall = self.registry.timer(
            DURATION,
            "Execution duration for service method",
            &[("class", class), ("method", method)],
        );
        let started = Instant::now();

        let result = work.await;

        match &result {
            Ok(_) => {
                let tags = [("class", class), ("method", method)];
                self.count("job_throughput_total", "Total job executions", &tags);
                self.count("service_success_total", "Successful job executions", &tags);
                self.record_outcome(started, class, method, OUTCOME_SUCCESS, NO_EXCEPTION);
            }
            Err(e) => {
                let kind = e.kind();
                tracing::debug!(%class, %method, exception = kind, "service call failed");
                let tags = [("class", class), ("method", method), ("exception", kind)];
                self.count("service_failures_total", "Failed job executions", &tags);
                self.record_outcome(started, class, method, OUTCOME_FAILURE, kind);
            }
        }

        match overall {
            Ok(t) => t.record(started.elapsed()),
            Err(e) => tracing::warn!(error = %e, "overall duration timer unavailable"),
        }

        result
    }

    fn count(&self, name: &str, help: &str, tags: &[(&str, &str)]) {
        match self.registry.counter(name, help, tags) {
            Ok(c) => c.inc(),
            Err(e) => tracing::warn!(error = %e, "instrumentation counter unavailable"),
        }
    }

    fn record_outcome(
        &self,
        started: Instant,
        class: &str,
        method: &str,
        outcome: &str,
        exception: &str,
    ) {
        let tags = [
            ("class", class),
            ("method", method),
            ("outcome", outcome),
            ("exception", exception),
        ];
        match self.registry.timer(DURATION, "Execution duration by outcome", &tags) {
            Ok(t) => t.record(started.elapsed()),
            Err(e) => tracing::warn!(error = %e, "outcome duration timer unavailable"),
        }
    }
}
