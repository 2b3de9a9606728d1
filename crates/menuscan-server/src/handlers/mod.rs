//! HTTP handlers. Each one delegates to the orchestrator or the health
//! aggregator; none holds logic of its own.

pub mod dishes;
pub mod health;
pub mod menu;
pub mod metrics;
pub mod root;

use crate::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::not_found("Route")
}
