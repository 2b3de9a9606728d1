//! Structured search query and its Elasticsearch rendering.

use std::fmt;

use serde_json::{Map, Value, json};

/// A field matched by the free-text term, with an optional boost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedField {
    pub name: String,
    pub boost: Option<u32>,
}

impl WeightedField {
    pub fn boosted(name: impl Into<String>, boost: u32) -> Self {
        Self {
            name: name.into(),
            boost: Some(boost),
        }
    }

    pub fn plain(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            boost: None,
        }
    }
}

impl fmt::Display for WeightedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.boost {
            Some(boost) => write!(f, "{}^{}", self.name, boost),
            None => f.write_str(&self.name),
        }
    }
}

/// Term-matching tolerance. Only the backend-decided policy is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fuzziness {
    /// Edit distance chosen by the backend from the term length.
    #[default]
    Auto,
}

impl Fuzziness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
        }
    }
}

/// A non-scoring filter clause.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Matches documents whose field equals any of the values.
    Terms { field: String, values: Vec<String> },
    /// Inclusive numeric range; at least one bound is set.
    Range {
        field: String,
        gte: Option<f64>,
        lte: Option<f64>,
    },
}

impl FilterClause {
    fn to_elasticsearch(&self) -> Value {
        let (kind, field, body) = match self {
            Self::Terms { field, values } => ("terms", field, json!(values)),
            Self::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(gte) = gte {
                    bounds.insert("gte".to_string(), json!(gte));
                }
                if let Some(lte) = lte {
                    bounds.insert("lte".to_string(), json!(lte));
                }
                ("range", field, Value::Object(bounds))
            },
        };

        let mut inner = Map::new();
        inner.insert(field.clone(), body);
        let mut clause = Map::new();
        clause.insert(kind.to_string(), Value::Object(inner));
        Value::Object(clause)
    }
}

/// Offset/limit window. `limit` is always > 0 once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Pagination {
    pub const DEFAULT_LIMIT: u64 = 20;

    /// One-based page number for display: `offset / limit + 1`.
    ///
    /// ```
    /// use menuscan_core::search::Pagination;
    ///
    /// assert_eq!(Pagination { offset: 40, limit: 20 }.page(), 3);
    /// assert_eq!(Pagination { offset: 0, limit: 20 }.page(), 1);
    /// ```
    pub fn page(&self) -> u64 {
        self.offset / self.limit.max(1) + 1
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// A validated search request, ready to be sent to the index.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub text: String,
    pub fields: Vec<WeightedField>,
    pub fuzziness: Fuzziness,
    pub filters: Vec<FilterClause>,
    pub pagination: Pagination,
    pub highlight: Vec<String>,
}

impl SearchQuery {
    /// Filters of the `terms` kind.
    pub fn terms_filters(&self) -> impl Iterator<Item = &FilterClause> {
        self.filters
            .iter()
            .filter(|f| matches!(f, FilterClause::Terms { .. }))
    }

    /// Filters of the `range` kind.
    pub fn range_filters(&self) -> impl Iterator<Item = &FilterClause> {
        self.filters
            .iter()
            .filter(|f| matches!(f, FilterClause::Range { .. }))
    }

    /// Renders the Elasticsearch `_search` request body.
    pub fn to_elasticsearch(&self) -> Value {
        let fields: Vec<String> = self.fields.iter().map(ToString::to_string).collect();
        let filters: Vec<Value> = self
            .filters
            .iter()
            .map(FilterClause::to_elasticsearch)
            .collect();
        let highlight: Map<String, Value> = self
            .highlight
            .iter()
            .map(|f| (f.clone(), json!({})))
            .collect();

        json!({
            "from": self.pagination.offset,
            "size": self.pagination.limit,
            "query": {
                "bool": {
                    "must": [{
                        "multi_match": {
                            "query": self.text,
                            "fields": fields,
                            "fuzziness": self.fuzziness.as_str(),
                        }
                    }],
                    "filter": filters,
                }
            },
            "highlight": { "fields": highlight },
        })
    }
}
