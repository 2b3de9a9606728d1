//! Menuscan Server - HTTP gateway for the Menuscan platform
//!
//! Fronts the menu extraction service, the dish search index and a shared
//! cache. Lookups by id go through a fail-soft cache-aside accessor, image
//! uploads are forwarded to extraction, and dish searches are validated and
//! translated into index queries.

pub mod cache;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod health;
pub mod metrics;
pub mod middleware;
pub mod orchestrator;
pub mod server;
pub mod state;

pub use config::{ConfigError, GatewayConfig};
pub use error::ApiError;
pub use orchestrator::{Orchestrator, OrchestratorConfig};
pub use server::{create_router, run_server};
pub use state::AppState;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
