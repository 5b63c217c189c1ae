//! Batched embedding service client.
//!
//! One `POST {base}/embed` round trip per search request: the query text
//! plus any candidates missing a precomputed vector.

use crate::clients::{check_status, transport_error};
use async_trait::async_trait;
use callrank_core::{BackendError, EmbeddingBackend};
use serde::Deserialize;
use serde_json::json;

/// Client for an HTTP embedding service with a
/// `{"texts": [...]}` → `{"embeddings": [[f32]]}` contract.
pub struct EmbeddingClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl EmbeddingClient {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl EmbeddingBackend for EmbeddingClient {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        let url = format!("{}/embed", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&json!({ "texts": texts }))
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(resp).await?;

        let parsed: EmbedResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;

        if parsed.embeddings.len() != texts.len() {
            return Err(BackendError::Malformed(format!(
                "requested {} embeddings, got {}",
                texts.len(),
                parsed.embeddings.len()
            )));
        }
        Ok(parsed.embeddings)
    }
}
