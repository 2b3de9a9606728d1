//! Dish endpoint handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use menuscan_core::ResourceKind;
use serde_json::Value;
use tracing::instrument;

use crate::error::ApiError;
use crate::extractors::{LookupParams, SearchParams};
use crate::orchestrator::SearchResponse;
use crate::state::AppState;

/// GET /api/v1/dishes/{dish_id}
#[instrument(skip_all, fields(dish_id = %dish_id, include_similar = options.include_similar))]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(dish_id): Path<String>,
    LookupParams(options): LookupParams,
) -> Result<Json<Value>, ApiError> {
    let dish = state
        .orchestrator()
        .get_by_id(ResourceKind::Dish, &dish_id, &options)
        .await?;
    Ok(Json(dish))
}

/// GET /api/v1/dishes/search
#[instrument(skip_all)]
pub async fn search_dishes(
    State(state): State<AppState>,
    SearchParams(params): SearchParams,
) -> Result<Json<SearchResponse>, ApiError> {
    let response = state.orchestrator().search_dishes(&params).await?;
    Ok(Json(response))
}
