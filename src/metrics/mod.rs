use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Running counters across projector invocations.
#[derive(Debug, Default, Clone)]
pub struct ProjectionMetrics {
    projections: u64,
    failures: u64,
    zones_placed: u64,
    edges_emitted: u64,
    references_skipped: u64,
}

impl ProjectionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_projection(&mut self, zones: usize, edges: usize, skipped: usize) {
        self.projections = self.projections.saturating_add(1);
        self.zones_placed = self.zones_placed.saturating_add(zones as u64);
        self.edges_emitted = self.edges_emitted.saturating_add(edges as u64);
        self.references_skipped = self.references_skipped.saturating_add(skipped as u64);
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            projections: self.projections,
            failures: self.failures,
            zones_placed: self.zones_placed,
            edges_emitted: self.edges_emitted,
            references_skipped: self.references_skipped,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub projections: u64,
    pub failures: u64,
    pub zones_placed: u64,
    pub edges_emitted: u64,
    pub references_skipped: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "projection_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("projections".to_string(), json!(self.projections));
        map.insert("failures".to_string(), json!(self.failures));
        map.insert("zones_placed".to_string(), json!(self.zones_placed));
        map.insert("edges_emitted".to_string(), json!(self.edges_emitted));
        map.insert(
            "references_skipped".to_string(),
            json!(self.references_skipped),
        );
        map
    }
}
