//! Menu endpoint handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use menuscan_core::{LookupOptions, ResourceKind};
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::extractors::MenuUpload;
use crate::state::AppState;

/// POST /api/v1/menu/upload
#[instrument(skip_all)]
pub async fn upload_menu(
    State(state): State<AppState>,
    upload: MenuUpload,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .orchestrator()
        .process_image(upload.image, upload.options)
        .await?;
    Ok(Json(result))
}

/// GET /api/v1/menu/{menu_id}
#[instrument(skip_all, fields(menu_id = %menu_id))]
pub async fn get_menu(
    State(state): State<AppState>,
    Path(menu_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let menu = state
        .orchestrator()
        .get_by_id(ResourceKind::Menu, &menu_id, &LookupOptions::default())
        .await?;
    Ok(Json(menu))
}
