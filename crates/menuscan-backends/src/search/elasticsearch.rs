//! Elasticsearch REST client.

use std::time::Duration;

use async_trait::async_trait;
use menuscan_core::search::{SearchHit, SearchQuery, SearchResult};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, instrument};

use super::SearchIndex;
use crate::error::SearchError;

/// Connection settings for the search cluster.
#[derive(Debug, Clone)]
pub struct ElasticsearchConfig {
    /// Base URL, e.g. `http://localhost:9200`.
    pub url: String,
    /// Index holding dish documents.
    pub index: String,
    pub request_timeout: Duration,
}

impl Default for ElasticsearchConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9200".to_string(),
            index: "dishes".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Searches dishes over the Elasticsearch `_search` API.
#[derive(Debug, Clone)]
pub struct ElasticsearchClient {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticsearchClient {
    pub fn new(config: ElasticsearchConfig) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            index: config.index,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, SearchError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SearchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SearchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SearchIndex for ElasticsearchClient {
    #[instrument(skip(self, query), fields(index = %self.index, text = %query.text))]
    async fn search(&self, query: &SearchQuery) -> Result<SearchResult, SearchError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        let response = self
            .http
            .post(&url)
            .json(&query.to_elasticsearch())
            .send()
            .await?;

        let body: SearchResponse = Self::read_json(response).await?;
        let result = body.into_result();
        debug!(hits = result.hits.len(), total = result.total, "Search completed");
        Ok(result)
    }

    async fn cluster_health(&self) -> Result<String, SearchError> {
        let url = format!("{}/_cluster/health", self.base_url);
        let response = self.http.get(&url).send().await?;
        let body: ClusterHealth = Self::read_json(response).await?;
        Ok(body.status)
    }

    fn name(&self) -> &str {
        "elasticsearch"
    }
}

#[derive(Debug, Deserialize)]
struct ClusterHealth {
    status: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    took: Option<u64>,
    hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
struct HitsEnvelope {
    #[serde(default)]
    total: Option<TotalHits>,
    #[serde(default)]
    hits: Vec<RawHit>,
}

/// ES 7+ reports `{"value": n, "relation": "eq"}`; older clusters a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            Self::Object { value } | Self::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawHit {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "_score", default)]
    score: Option<f64>,
    #[serde(rename = "_source", default)]
    source: Value,
    #[serde(default)]
    highlight: Option<Value>,
}

impl SearchResponse {
    fn into_result(self) -> SearchResult {
        let hits: Vec<SearchHit> = self
            .hits
            .hits
            .into_iter()
            .map(|raw| SearchHit {
                id: raw.id,
                score: raw.score,
                source: raw.source,
                highlight: raw.highlight,
            })
            .collect();

        let total = self
            .hits
            .total
            .as_ref()
            .map(TotalHits::value)
            .unwrap_or(hits.len() as u64);

        SearchResult {
            hits,
            total,
            took: self.took.map(Duration::from_millis),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "took": 4,
            "hits": {
                "total": {"value": 2, "relation": "eq"},
                "hits": [
                    {"_id": "d1", "_score": 2.5, "_source": {"name": "Tacos"},
                     "highlight": {"name": ["<em>Tacos</em>"]}},
                    {"_id": "d2", "_score": null, "_source": {"name": "Taco salad"}}
                ]
            }
        });

        let response: SearchResponse = serde_json::from_value(body).unwrap();
        let result = response.into_result();

        assert_eq!(result.total, 2);
        assert_eq!(result.took, Some(Duration::from_millis(4)));
        assert_eq!(result.hits[0].id, "d1");
        assert_eq!(result.hits[0].score, Some(2.5));
        assert!(result.hits[0].highlight.is_some());
        assert_eq!(result.hits[1].score, None);
    }

    #[test]
    fn test_legacy_total_and_missing_total() {
        let legacy: SearchResponse =
            serde_json::from_value(json!({"hits": {"total": 7, "hits": []}})).unwrap();
        assert_eq!(legacy.into_result().total, 7);

        let missing: SearchResponse = serde_json::from_value(
            json!({"hits": {"hits": [{"_id": "x", "_source": {}}]}}),
        )
        .unwrap();
        assert_eq!(missing.into_result().total, 1);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ElasticsearchClient::new(ElasticsearchConfig {
            url: "http://es:9200/".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "http://es:9200");
        assert_eq!(client.index(), "dishes");
    }
}
