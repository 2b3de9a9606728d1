//! Metrics for the Menuscan gateway.

pub mod backend;
pub mod cache;
pub mod http;
pub mod setup;

pub use backend::record_backend_call;
pub use cache::CacheMetrics;
pub use setup::{init_metrics, register_metrics};
