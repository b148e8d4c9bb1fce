//! Internal metrics collection.
//!
//! In-memory atomic counters, one outcome triple per subject. These are the
//! only window into queue-path dispositions after the producer has already
//! answered 202.

use std::sync::atomic::{AtomicU64, Ordering};

use pipeline_core::EventKind;

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Terminal dispositions recorded per subject.
#[derive(Debug, Default)]
pub struct SubjectOutcomes {
    /// Acknowledged after successful processing.
    pub success: Counter,
    /// Negatively acknowledged; the broker will redeliver.
    pub failed: Counter,
    /// Terminated as unprocessable; never redelivered.
    pub terminated: Counter,
}

/// Collected metrics for the pipeline.
#[derive(Debug, Default)]
pub struct Metrics {
    // Per-subject consumer outcomes
    pub gyroscope: SubjectOutcomes,
    pub gps: SubjectOutcomes,
    pub photo: SubjectOutcomes,

    // Producer boundary
    pub events_published: Counter,
    pub publish_errors: Counter,
    pub events_rejected: Counter,

    // Recognition pipeline
    pub cache_hits: Counter,
    pub cache_misses: Counter,
    pub faces_matched: Counter,
    pub faces_enrolled: Counter,
    pub enrollment_errors: Counter,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome counters for an event kind's subject.
    pub fn outcomes(&self, kind: EventKind) -> &SubjectOutcomes {
        match kind {
            EventKind::Gyroscope => &self.gyroscope,
            EventKind::Gps => &self.gps,
            EventKind::Photo => &self.photo,
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
