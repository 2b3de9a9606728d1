//! Resource kinds, cache keys and lookup policy.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// TTL applied to dish lookups populated from the menu service.
pub const DISH_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Resource types the gateway can look up by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Dish,
    Menu,
}

impl ResourceKind {
    /// Namespace prefix used in cache keys.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::Dish => "dish",
            Self::Menu => "menu",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.namespace())
    }
}

/// Key unica para el cache de recursos.
///
/// The namespace prefix makes keys collision-free across resource kinds:
/// `dish:42` and `menu:42` never alias. Identifiers are opaque and kept
/// verbatim.
///
/// # Examples
///
/// ```
/// use menuscan_core::{CacheKey, ResourceKind};
///
/// let key = CacheKey::new(ResourceKind::Dish, "42");
/// assert_eq!(key.to_string(), "dish:42");
/// assert_eq!(key.id(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: ResourceKind,
    id: String,
}

impl CacheKey {
    pub fn new(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.namespace(), self.id)
    }
}

/// Per-request options for a lookup by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LookupOptions {
    /// Ask the menu service to attach similar dishes.
    #[serde(deserialize_with = "bool_from_flag")]
    pub include_similar: bool,
}

/// Accepts `true`/`false` as either a boolean or a query-string flag.
/// Only the literal `"true"` enables the option.
fn bool_from_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    Ok(match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => b,
        Flag::Text(s) => s == "true",
    })
}

/// How a resource kind interacts with the cache on a miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookupPolicy {
    /// TTL for write-through after a successful backend fetch.
    /// `None` means the kind is served from cache only and never populated.
    pub cache_ttl: Option<Duration>,
}

impl LookupPolicy {
    /// Policy for a kind that is written through with the given TTL.
    pub fn populate(ttl: Duration) -> Self {
        Self {
            cache_ttl: Some(ttl),
        }
    }

    /// Policy for a kind that is only read from cache.
    pub fn read_only() -> Self {
        Self { cache_ttl: None }
    }

    pub fn populates_cache(&self) -> bool {
        self.cache_ttl.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_cache_key_format() {
        assert_eq!(CacheKey::new(ResourceKind::Dish, "42").to_string(), "dish:42");
        assert_eq!(CacheKey::new(ResourceKind::Menu, "abc").to_string(), "menu:abc");
    }

    #[test]
    fn test_cache_key_namespaces_do_not_collide() {
        let mut set = HashSet::new();
        set.insert(CacheKey::new(ResourceKind::Dish, "1").to_string());
        set.insert(CacheKey::new(ResourceKind::Menu, "1").to_string());

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_cache_key_is_case_sensitive() {
        // Los ids son opacos, no se normalizan
        let a = CacheKey::new(ResourceKind::Dish, "AbC");
        let b = CacheKey::new(ResourceKind::Dish, "abc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_policy_constructors() {
        assert_eq!(
            LookupPolicy::populate(DISH_CACHE_TTL).cache_ttl,
            Some(Duration::from_secs(3600))
        );
        assert!(!LookupPolicy::read_only().populates_cache());
    }

    #[test]
    fn test_lookup_options_flag() {
        let opts: LookupOptions = serde_json::from_str(r#"{"include_similar":"true"}"#).unwrap();
        assert!(opts.include_similar);

        let opts: LookupOptions = serde_json::from_str(r#"{"include_similar":"yes"}"#).unwrap();
        assert!(!opts.include_similar);

        let opts: LookupOptions = serde_json::from_str("{}").unwrap();
        assert!(!opts.include_similar);
    }
}
