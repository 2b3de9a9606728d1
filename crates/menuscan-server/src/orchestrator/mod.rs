//! Resource orchestrator.
//!
//! Composes the cache, the menu service and the search index into the
//! three gateway operations:
//!
//! - `get_by_id`: cache-aside lookup of a dish or menu
//! - `process_image`: forwards a menu image to extraction
//! - `search_dishes`: validated full-text dish search
//!
//! All collaborators are injected at construction; nothing is global.

mod image;
mod lookup;
mod search;

use std::sync::Arc;
use std::time::Duration;

use menuscan_backends::{MenuBackend, SearchIndex};
use menuscan_core::search::{DEFAULT_MAX_LIMIT, SearchQueryBuilder};
use menuscan_core::{DISH_CACHE_TTL, LookupPolicy, ResourceKind};

use crate::cache::CacheAside;

pub use search::{SearchMetadata, SearchResponse};

/// Tunables of the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorConfig {
    /// TTL for dishes written through after a backend fetch.
    pub dish_ttl: Duration,
    /// Largest accepted search page size.
    pub max_page_size: u64,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            dish_ttl: DISH_CACHE_TTL,
            max_page_size: DEFAULT_MAX_LIMIT,
        }
    }
}

impl OrchestratorConfig {
    /// Cache policy for a resource kind. Menus are never populated by a
    /// lookup; dishes are written through with `dish_ttl`.
    pub fn policy_for(&self, kind: ResourceKind) -> LookupPolicy {
        match kind {
            ResourceKind::Dish => LookupPolicy::populate(self.dish_ttl),
            ResourceKind::Menu => LookupPolicy::read_only(),
        }
    }
}

/// Entry point for every gateway operation.
#[derive(Clone)]
pub struct Orchestrator {
    cache: CacheAside,
    backend: Arc<dyn MenuBackend>,
    index: Arc<dyn SearchIndex>,
    query_builder: SearchQueryBuilder,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(
        cache: CacheAside,
        backend: Arc<dyn MenuBackend>,
        index: Arc<dyn SearchIndex>,
        config: OrchestratorConfig,
    ) -> Self {
        Self {
            cache,
            backend,
            index,
            query_builder: SearchQueryBuilder::new(config.max_page_size),
            config,
        }
    }

    pub fn cache(&self) -> &CacheAside {
        &self.cache
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

/// Human label of a resource kind, for error bodies.
fn resource_label(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Dish => "Dish",
        ResourceKind::Menu => "Menu",
    }
}
