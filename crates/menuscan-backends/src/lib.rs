//! # Menuscan Backends
//!
//! Adapters between the gateway and the services it fronts.
//!
//! ## Features
//!
//! - Cache stores with per-entry TTL: Redis (primary) and an in-process
//!   Moka store, plus a liveness probe for the Memcached secondary cache
//! - gRPC client for the menu (extraction) service with normalized errors
//! - Elasticsearch client for dish search
//!
//! ## Example
//!
//! ```ignore
//! use menuscan_backends::{MenuBackend, MenuServiceClient, RpcEndpoint};
//!
//! let endpoint = RpcEndpoint::new("menu", "http://localhost:50051", Duration::from_secs(5))?;
//! let client = MenuServiceClient::new(&endpoint);
//!
//! let dish = client.get_dish("42", false).await?;
//! ```

pub mod cache;
pub mod error;
pub mod rpc;
pub mod search;

// Re-exports
pub use cache::{CacheStore, MemcachedProbe, MemoryStore, RedisStore};
pub use error::{BackendError, BackendErrorKind, CacheError, SearchError};
pub use rpc::{MenuBackend, MenuServiceClient, ProcessImageRequest, RpcEndpoint};
pub use search::{ElasticsearchClient, ElasticsearchConfig, SearchIndex};

// Re-export menuscan_core for consumers
pub use menuscan_core;
