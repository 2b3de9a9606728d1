//! Cache metrics recording.

use metrics::{counter, gauge, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Registra las metricas de cache.
pub fn register_cache_metrics() {
    metrics::describe_counter!("menuscan_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!(
        "menuscan_cache_misses_total",
        "Total number of cache misses"
    );
    metrics::describe_counter!(
        "menuscan_cache_errors_total",
        "Cache failures degraded to a miss or a skipped write"
    );
    metrics::describe_gauge!(
        "menuscan_cache_hit_ratio",
        "Hits over lookups since start"
    );
    metrics::describe_histogram!(
        "menuscan_cache_operation_seconds",
        "Time spent on cache operations"
    );
}

/// Recorder de metricas de cache.
/// Keeps local atomic counters so hit rate is observable without a recorder.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    errors: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new() -> Self {
        Self {
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            errors: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_hit(&self, namespace: &'static str) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("menuscan_cache_hits_total", "namespace" => namespace).increment(1);
        gauge!("menuscan_cache_hit_ratio").set(self.hit_rate());
    }

    pub fn record_miss(&self, namespace: &'static str) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("menuscan_cache_misses_total", "namespace" => namespace).increment(1);
        gauge!("menuscan_cache_hit_ratio").set(self.hit_rate());
    }

    /// `operation` is `get` or `set`.
    pub fn record_error(&self, operation: &'static str) {
        self.errors.fetch_add(1, Ordering::Relaxed);
        counter!("menuscan_cache_errors_total", "operation" => operation).increment(1);
    }

    pub fn record_operation_duration(&self, operation: &'static str, duration: Duration) {
        histogram!("menuscan_cache_operation_seconds", "operation" => operation)
            .record(duration.as_secs_f64());
    }

    /// Hits over lookups, exported as `menuscan_cache_hit_ratio`.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.hits() as f64;
        let total = hits + self.misses() as f64;
        if total == 0.0 { 0.0 } else { hits / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}

impl Default for CacheMetrics {
    fn default() -> Self {
        Self::new()
    }
}
