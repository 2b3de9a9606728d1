//! Dish search.

use std::collections::BTreeMap;
use std::time::Instant;

use menuscan_core::search::RawSearchParams;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use super::Orchestrator;
use crate::error::ApiError;
use crate::metrics::record_backend_call;

/// Body of a dish search response.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Hits in backend relevance order, each with `dish_id` and `_score`.
    pub dishes: Vec<Value>,
    pub total_results: u64,
    pub page: u64,
    pub metadata: SearchMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchMetadata {
    /// Wall-clock time of the index call, measured by the gateway.
    pub search_time_ms: u64,
    /// Not populated yet.
    pub suggested_queries: Vec<String>,
    /// Not populated yet.
    pub category_counts: BTreeMap<String, u64>,
}

impl Orchestrator {
    /// Validates the parameters, queries the index and shapes the hits.
    ///
    /// Validation failures are returned before the index is contacted.
    #[instrument(skip_all)]
    pub async fn search_dishes(&self, params: &RawSearchParams) -> Result<SearchResponse, ApiError> {
        let query = self.query_builder.build(params)?;
        debug!(text = %query.text, filters = query.filters.len(), "Searching dishes");

        let start = Instant::now();
        let result = self.index.search(&query).await;
        let elapsed = start.elapsed();

        let result = result.map_err(|e| {
            record_backend_call("search_dishes", "error", elapsed);
            error!(index = self.index.name(), error = %e, "Search failed");
            ApiError::Search
        })?;
        record_backend_call("search_dishes", "ok", elapsed);

        Ok(SearchResponse {
            dishes: result.hits.into_iter().map(|hit| hit.into_record()).collect(),
            total_results: result.total,
            page: query.pagination.page(),
            metadata: SearchMetadata {
                search_time_ms: elapsed.as_millis() as u64,
                suggested_queries: Vec::new(),
                category_counts: BTreeMap::new(),
            },
        })
    }
}
