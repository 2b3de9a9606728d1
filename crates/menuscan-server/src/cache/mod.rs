//! Cache-aside access for the gateway.
//!
//! Wraps a [`CacheStore`](menuscan_backends::CacheStore) with the gateway's
//! failure policy: reads degrade to a miss and writes are best effort, so
//! the cache can never fail a request.

pub mod accessor;

pub use accessor::CacheAside;
