//! Dish search index.

mod elasticsearch;

use async_trait::async_trait;
use menuscan_core::search::{SearchQuery, SearchResult};

use crate::error::SearchError;

pub use self::elasticsearch::{ElasticsearchClient, ElasticsearchConfig};

/// A full-text index of dishes.
///
/// # Implementors
///
/// - `ElasticsearchClient` - REST client for an Elasticsearch cluster
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Runs one query. Hits come back in backend relevance order.
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError>;

    /// Cluster health color (`green`, `yellow`, `red`).
    async fn cluster_health(&self) -> Result<String, SearchError>;

    /// Returns the name of this index, for logs.
    fn name(&self) -> &str;
}
