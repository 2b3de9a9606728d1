//! Health endpoint handler.

use axum::{Json, extract::State, http::StatusCode};
use menuscan_core::HealthReport;
use tracing::instrument;

use crate::state::AppState;

/// GET /api/v1/health: 200 when healthy, 503 when degraded.
#[instrument(skip_all)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = state.health().check().await;
    let status =
        StatusCode::from_u16(report.status.http_status()).unwrap_or(StatusCode::SERVICE_UNAVAILABLE);
    (status, Json(report))
}
