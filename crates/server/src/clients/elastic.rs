//! Elasticsearch-compatible lexical retrieval client.
//!
//! Issues a `multi_match` query over the boosted text fields and parses the
//! hits into [`Document`]s. Individual hits that fail to parse are logged
//! and skipped rather than failing the whole candidate set; the index
//! mapping is not under this service's control.

use crate::clients::{check_status, transport_error};
use async_trait::async_trait;
use callrank_core::{BackendError, Document, LexicalBackend, LexicalHit};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

/// Fields searched by the lexical query, with boosts: the transcript
/// dominates, tags outrank the summary.
const SEARCH_FIELDS: [&str; 3] = ["text_full^3", "text_summary", "tags^2"];

/// Lexical retrieval over an Elasticsearch-compatible HTTP API.
pub struct ElasticClient {
    client: reqwest::Client,
    base_url: String,
    index: String,
}

#[derive(Deserialize)]
struct EsResponse {
    hits: EsHits,
}

#[derive(Deserialize)]
struct EsHits {
    hits: Vec<EsHit>,
}

#[derive(Deserialize)]
struct EsHit {
    #[serde(rename = "_score")]
    score: Option<f32>,
    #[serde(rename = "_source")]
    source: serde_json::Value,
}

impl ElasticClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            index: index.into(),
        }
    }
}

#[async_trait]
impl LexicalBackend for ElasticClient {
    async fn top_candidates(
        &self,
        query: &str,
        size: usize,
    ) -> Result<Vec<LexicalHit>, BackendError> {
        let url = format!("{}/{}/_search", self.base_url, self.index);
        let body = json!({
            "size": size,
            "query": {
                "multi_match": {
                    "query": query,
                    "fields": SEARCH_FIELDS,
                    "fuzziness": "AUTO",
                }
            }
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(resp).await?;

        let parsed: EsResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        let mut hits = Vec::with_capacity(parsed.hits.hits.len());
        for hit in parsed.hits.hits {
            match serde_json::from_value::<Document>(hit.source) {
                Ok(document) => hits.push(LexicalHit {
                    document,
                    raw_score: hit.score.unwrap_or(0.0),
                }),
                Err(e) => {
                    warn!(error = %e, "skipping unparseable hit from lexical index");
                }
            }
        }
        Ok(hits)
    }
}
