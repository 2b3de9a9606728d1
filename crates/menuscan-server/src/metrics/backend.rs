//! Backend call outcome metrics.

use std::time::Duration;

use metrics::{counter, histogram};

pub fn register_backend_metrics() {
    metrics::describe_counter!(
        "menuscan_backend_calls_total",
        "Calls to the menu service and search index, by outcome"
    );
    metrics::describe_histogram!(
        "menuscan_backend_call_seconds",
        "Latency of calls to the menu service and search index"
    );
}

/// Records one backend call. `outcome` is `ok` or an error kind.
pub fn record_backend_call(operation: &'static str, outcome: &'static str, duration: Duration) {
    counter!(
        "menuscan_backend_calls_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);

    histogram!("menuscan_backend_call_seconds", "operation" => operation)
        .record(duration.as_secs_f64());
}
