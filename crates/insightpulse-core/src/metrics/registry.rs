use std::fmt::Write;

use dashmap::DashMap;

use super::meters::{tag_set, Counter, Gauge, TagSet, Timer, BUCKETS_MILLIS};
use crate::error::{InsightError, MeterKind, Result};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

/// `{k="v",...}` with an optional trailing label, or nothing when empty.
fn label_str(tags: &TagSet, extra: Option<(&str, &str)>) -> String {
    let mut parts: Vec<String> = tags
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect();
    if let Some((k, v)) = extra {
        parts.push(format!("{}=\"{}\"", k, escape_label(v)));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(","))
    }
}

#[derive(Debug, Clone)]
enum Series {
    Counter(Counter),
    Gauge(Gauge),
    Timer(Timer),
}

impl Series {
    fn kind(&self) -> MeterKind {
        match self {
            Series::Counter(_) => MeterKind::Counter,
            Series::Gauge(_) => MeterKind::Gauge,
            Series::Timer(_) => MeterKind::Timer,
        }
    }
}

struct Family {
    kind: MeterKind,
    help: String,
    series: DashMap<TagSet, Series>,
}

/// Registry of metric families keyed by name.
///
/// A tag-set uniquely identifies a series within a name; registering the same
/// `(name, tags)` again hands back the existing series.
#[derive(Default)]
pub struct MeterRegistry {
    families: DashMap<String, Family>,
}

impl MeterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, name: &str, help: &str, tags: &[(&str, &str)]) -> Result<Counter> {
        match self.series(name, help, MeterKind::Counter, tags)? {
            Series::Counter(c) => Ok(c),
            other => Err(conflict(name, other.kind(), MeterKind::Counter)),
        }
    }

    pub fn gauge(&self, name: &str, help: &str, tags: &[(&str, &str)]) -> Result<Gauge> {
        match self.series(name, help, MeterKind::Gauge, tags)? {
            Series::Gauge(g) => Ok(g),
            other => Err(conflict(name, other.kind(), MeterKind::Gauge)),
        }
    }

    pub fn timer(&self, name: &str, help: &str, tags: &[(&str, &str)]) -> Result<Timer> {
        match self.series(name, help, MeterKind::Timer, tags)? {
            Series::Timer(t) => Ok(t),
            other => Err(conflict(name, other.kind(), MeterKind::Timer)),
        }
    }

    /// Look up an existing counter without registering it.
    pub fn find_counter(&self, name: &str, tags: &[(&str, &str)]) -> Option<Counter> {
        match self.find(name, tags)? {
            Series::Counter(c) => Some(c),
            _ => None,
        }
    }

    pub fn find_gauge(&self, name: &str, tags: &[(&str, &str)]) -> Option<Gauge> {
        match self.find(name, tags)? {
            Series::Gauge(g) => Some(g),
            _ => None,
        }
    }

    pub fn find_timer(&self, name: &str, tags: &[(&str, &str)]) -> Option<Timer> {
        match self.find(name, tags)? {
            Series::Timer(t) => Some(t),
            _ => None,
        }
    }

    /// Number of series registered under `name`.
    pub fn series_count(&self, name: &str) -> usize {
        self.families.get(name).map(|f| f.series.len()).unwrap_or(0)
    }

    fn find(&self, name: &str, tags: &[(&str, &str)]) -> Option<Series> {
        let family = self.families.get(name)?;
        let series = family.series.get(&tag_set(tags))?;
        Some(series.value().clone())
    }

    fn series(
        &self,
        name: &str,
        help: &str,
        kind: MeterKind,
        tags: &[(&str, &str)],
    ) -> Result<Series> {
        let key = tag_set(tags);

        // Read lock first; the write path only runs on first registration of a name.
        if let Some(family) = self.families.get(name) {
            return family_series(&family, name, kind, key);
        }

        let family = self.families.entry(name.to_string()).or_insert_with(|| {
            tracing::debug!(meter = %name, kind = kind.as_str(), "registering meter family");
            Family {
                kind,
                help: help.to_string(),
                series: DashMap::new(),
            }
        });
        family_series(&family, name, kind, key)
    }

    /// Render all families in Prometheus text exposition format (0.0.4).
    pub fn render(&self) -> String {
        let mut names: Vec<String> = self.families.iter().map(|f| f.key().clone()).collect();
        names.sort();

        let mut out = String::new();
        for name in names {
            let Some(family) = self.families.get(&name) else { continue };

            let mut series: Vec<(TagSet, Series)> = family
                .series
                .iter()
                .map(|r| (r.key().clone(), r.value().clone()))
                .collect();
            series.sort_by(|a, b| a.0.cmp(&b.0));

            let _ = writeln!(out, "# HELP {} {}", name, escape_help(&family.help));
            let _ = writeln!(out, "# TYPE {} {}", name, family.kind.as_str());

            let mut maxima = Vec::new();
            for (tags, s) in &series {
                match s {
                    Series::Counter(c) => {
                        let _ = writeln!(out, "{}{} {}", name, label_str(tags, None), c.value());
                    }
                    Series::Gauge(g) => {
                        let _ = writeln!(out, "{}{} {}", name, label_str(tags, None), g.value());
                    }
                    Series::Timer(t) => {
                        for (le_ms, (_, count)) in BUCKETS_MILLIS.iter().zip(t.buckets()) {
                            let le = (*le_ms as f64 / 1000.0).to_string();
                            let _ = writeln!(
                                out,
                                "{}_bucket{} {}",
                                name,
                                label_str(tags, Some(("le", le.as_str()))),
                                count
                            );
                        }
                        let count = t.count();
                        let _ = writeln!(
                            out,
                            "{}_bucket{} {}",
                            name,
                            label_str(tags, Some(("le", "+Inf"))),
                            count
                        );
                        let _ = writeln!(
                            out,
                            "{}_sum{} {}",
                            name,
                            label_str(tags, None),
                            t.total().as_secs_f64()
                        );
                        let _ = writeln!(out, "{}_count{} {}", name, label_str(tags, None), count);
                        maxima.push((label_str(tags, None), t.max().as_secs_f64()));
                    }
                }
            }

            if !maxima.is_empty() {
                let _ = writeln!(out, "# HELP {}_max {}", name, escape_help(&family.help));
                let _ = writeln!(out, "# TYPE {}_max gauge", name);
                for (labels, max) in maxima {
                    let _ = writeln!(out, "{}_max{} {}", name, labels, max);
                }
            }
        }
        out
    }
}

fn family_series(family: &Family, name: &str, kind: MeterKind, key: TagSet) -> Result<Series> {
    if family.kind != kind {
        return Err(conflict(name, family.kind, kind));
    }
    let series = family.series.entry(key).or_insert_with(|| match kind {
        MeterKind::Counter => Series::Counter(Counter::default()),
        MeterKind::Gauge => Series::Gauge(Gauge::default()),
        MeterKind::Timer => Series::Timer(Timer::default()),
    });
    Ok(series.value().clone())
}

fn conflict(name: &str, existing: MeterKind, requested: MeterKind) -> InsightError {
    InsightError::MeterConflict {
        name: name.to_string(),
        existing,
        requested,
    }
}
