//! Loosely-typed search parameters as they arrive on the query string.

use std::collections::BTreeMap;

/// Multimap of raw query parameters. Keys may repeat
/// (`?category=a&category=b`), values are untyped strings.
///
/// # Example
///
/// ```
/// use menuscan_core::search::RawSearchParams;
///
/// let params = RawSearchParams::from_pairs(vec![
///     ("q".to_string(), "tacos".to_string()),
///     ("category".to_string(), "mexican".to_string()),
///     ("category".to_string(), "street".to_string()),
/// ]);
///
/// assert_eq!(params.first("q"), Some("tacos"));
/// assert_eq!(params.all("category").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchParams {
    values: BTreeMap<String, Vec<String>>,
}

impl RawSearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the multimap preserving the order of repeated keys.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (k, v) in pairs {
            params.push(k, v);
        }
        params
    }

    /// Adds a value for a key.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(key.into())
            .or_default()
            .push(value.into());
    }

    /// Builder-style variant of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// First value for a key, if any.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// First non-blank value among the given aliases, trimmed.
    pub fn first_non_blank(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.first(k))
            .map(str::trim)
            .find(|v| !v.is_empty())
    }

    /// All values for a key in arrival order.
    pub fn all(&self, key: &str) -> &[String] {
        self.values.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawSearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}
