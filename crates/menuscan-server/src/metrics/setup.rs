//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

use super::{backend, cache, http};

/// Describes every gateway metric on the installed recorder.
pub fn register_metrics() {
    cache::register_cache_metrics();
    http::register_http_metrics();
    backend::register_backend_metrics();
}

/// Installs the Prometheus recorder and returns the handle for `/metrics`.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets(&[
            0.0005, // 500 microsegundos
            0.001,  // 1 milisegundo
            0.005,  // 5 milisegundos
            0.01,   // 10 milisegundos
            0.025,  // 25 milisegundos
            0.05,   // 50 milisegundos
            0.1,    // 100 milisegundos
            0.25,   // 250 milisegundos
            0.5,    // 500 milisegundos
            1.0,    // 1 segundo
            2.5,    // 2.5 segundos
            5.0,    // 5 segundos
            10.0,   // 10 segundos
            30.0,   // extraccion de imagenes lentas
        ])?
        .install_recorder()?;

    register_metrics();
    info!("Metrics system initialized");
    Ok(handle)
}

/// A handle backed by a recorder that is not installed globally.
/// Used by tests that build a router.
pub fn detached_handle() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}
