//! Menuscan Core - Domain types for the Menuscan gateway
//!
//! This crate holds everything the gateway decides without doing I/O:
//! cache keys and lookup policy, extraction options, dish search query
//! construction, the health model and the client-facing error taxonomy.

pub mod error;
pub mod extraction;
pub mod health;
pub mod resource;
pub mod search;

pub use error::ErrorCode;
pub use extraction::{ExtractionOptions, ImageUpload, RawExtractionOptions};
pub use health::{Dependency, DependencyStatus, HealthReport, OverallStatus};
pub use resource::{CacheKey, DISH_CACHE_TTL, LookupOptions, LookupPolicy, ResourceKind};

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
