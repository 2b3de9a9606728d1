//! Search results returned by the index.

use std::time::Duration;

use serde_json::{Map, Value};

/// One scored hit, in backend relevance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Backend-assigned document id.
    pub id: String,
    /// Relevance score; absent when the backend does not score (e.g. sorted queries).
    pub score: Option<f64>,
    /// Document payload.
    pub source: Value,
    /// Highlighted fragments per field, when requested.
    pub highlight: Option<Value>,
}

impl SearchHit {
    pub fn new(id: impl Into<String>, score: Option<f64>, source: Value) -> Self {
        Self {
            id: id.into(),
            score,
            source,
            highlight: None,
        }
    }

    /// Merges id and score into the payload as `dish_id` and `_score`.
    /// Non-object payloads are wrapped under `source`.
    pub fn into_record(self) -> Value {
        let mut record = match self.source {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("source".to_string(), other);
                map
            },
        };

        record.insert("dish_id".to_string(), Value::String(self.id));
        record.insert(
            "_score".to_string(),
            self.score
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        );
        if let Some(highlight) = self.highlight {
            record.insert("_highlight".to_string(), highlight);
        }

        Value::Object(record)
    }
}

/// Result of one search call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub hits: Vec<SearchHit>,
    pub total: u64,
    /// Time reported by the backend itself, if any.
    pub took: Option<Duration>,
}
