//! Meter handles: counters, gauges and timers.
//!
//! Handles are cheap to clone; every clone points at the same atomics as the
//! series stored in the registry.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Normalised label set: `(key, value)` pairs sorted by key.
pub type TagSet = Vec<(String, String)>;

pub(crate) fn tag_set(tags: &[(&str, &str)]) -> TagSet {
    let mut key: TagSet = tags
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// Monotonic integer counter.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    value: Arc<AtomicU64>,
}

impl Counter {
    /// Increment by 1.
    pub fn inc(&self) {
        self.add(1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, v: u64) {
        self.value.fetch_add(v, Ordering::Relaxed);
    }

    pub fn value(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Gauge sampled from a shared process-local integer.
#[derive(Debug, Clone, Default)]
pub struct Gauge {
    value: Arc<AtomicI64>,
}

impl Gauge {
    pub fn set(&self, v: i64) {
        self.value.store(v, Ordering::Relaxed);
    }

    pub fn value(&self) -> i64 {
        self.value.load(Ordering::Relaxed)
    }
}

/// Histogram bucket upper bounds in milliseconds (5ms .. 10s).
pub const BUCKETS_MILLIS: [u64; 12] = [
    5, 10, 25, 50, 100, 250, 500, 750, 1_000, 2_500, 5_000, 10_000,
];

#[derive(Debug)]
struct TimerCore {
    count: AtomicU64,
    sum_nanos: AtomicU64,
    max_nanos: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MILLIS.len()],
}

impl Default for TimerCore {
    fn default() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_nanos: AtomicU64::new(0),
            max_nanos: AtomicU64::new(0),
            buckets: std::array::from_fn(|_| AtomicU64::new(0)),
        }
    }
}

/// Distribution of elapsed durations with a cumulative percentile histogram.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    core: Arc<TimerCore>,
}

impl Timer {
    /// Record one duration. Buckets are cumulative: every bucket whose bound is
    /// at or above the sample is incremented.
    pub fn record(&self, duration: Duration) {
        let nanos = u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX);
        let core = &self.core;

        core.count.fetch_add(1, Ordering::Relaxed);
        core.sum_nanos.fetch_add(nanos, Ordering::Relaxed);
        core.max_nanos.fetch_max(nanos, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MILLIS.iter().enumerate() {
            if nanos <= b * 1_000_000 {
                core.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Start a sample that records into this timer when stopped.
    pub fn start(&self) -> TimerSample {
        TimerSample {
            timer: self.clone(),
            started: Instant::now(),
        }
    }

    pub fn count(&self) -> u64 {
        self.core.count.load(Ordering::Relaxed)
    }

    /// Sum of all recorded durations.
    pub fn total(&self) -> Duration {
        Duration::from_nanos(self.core.sum_nanos.load(Ordering::Relaxed))
    }

    pub fn max(&self) -> Duration {
        Duration::from_nanos(self.core.max_nanos.load(Ordering::Relaxed))
    }

    /// Cumulative bucket counts paired with their upper bound.
    pub fn buckets(&self) -> Vec<(Duration, u64)> {
        BUCKETS_MILLIS
            .iter()
            .zip(self.core.buckets.iter())
            .map(|(&b, c)| (Duration::from_millis(b), c.load(Ordering::Relaxed)))
            .collect()
    }
}

/// In-flight timing started by [`Timer::start`].
#[derive(Debug)]
pub struct TimerSample {
    timer: Timer,
    started: Instant,
}

impl TimerSample {
    /// Record the elapsed time and return it.
    pub fn stop(self) -> Duration {
        let elapsed = self.started.elapsed();
        self.timer.record(elapsed);
        elapsed
    }
}
