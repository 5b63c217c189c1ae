//! Request and response data transfer objects for the REST API.
//!
//! All types derive `Serialize` and/or `Deserialize` for JSON marshalling via
//! Axum. Result bodies flatten the document fields the search UI actually
//! renders rather than echoing whole transcripts back.

use callrank_core::{SearchResult, SignalContribution};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Request body for `POST /search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// One ranked result in a search response.
#[derive(Debug, Serialize)]
pub struct SearchResultBody {
    pub call_id: String,
    pub call_type: Option<String>,
    pub operator_name: String,
    pub tags: Vec<String>,
    pub qa_total_score: i64,
    pub qa_critical_violation: bool,
    pub text_summary: String,
    pub relevance_score: f32,
    pub score_breakdown: BTreeMap<String, SignalContribution>,
    pub relevance_reason: String,
}

impl From<&SearchResult> for SearchResultBody {
    fn from(result: &SearchResult) -> Self {
        let doc = &result.document;
        Self {
            call_id: doc.call_id.clone(),
            call_type: doc.metadata.call_type.clone(),
            operator_name: doc.metadata.operator_name.clone(),
            tags: doc.metadata.tags.clone(),
            qa_total_score: doc.metadata.qa_total_score,
            qa_critical_violation: doc.metadata.qa_critical_violation,
            text_summary: doc.text_summary.clone(),
            relevance_score: result.relevance_score,
            score_breakdown: result
                .breakdown
                .iter()
                .map(|(signal, contribution)| (signal.as_str().to_string(), *contribution))
                .collect(),
            relevance_reason: result.relevance_reason.clone(),
        }
    }
}

/// Response body for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchResponseBody {
    pub results: Vec<SearchResultBody>,
    /// Candidates ranked before truncation to `limit`.
    pub total: usize,
    pub query: String,
}

/// Request body for `PUT /weights`.
#[derive(Debug, Deserialize)]
pub struct UpdateWeightsRequest {
    pub weights: HashMap<String, f32>,
}

/// Response body for `PUT /weights`: the full active weight table after the
/// update.
#[derive(Debug, Serialize)]
pub struct WeightsResponse {
    pub weights: BTreeMap<String, f32>,
}

/// Response body for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub semantic_enabled: bool,
    pub llm_enabled: bool,
}
