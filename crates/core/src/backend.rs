//! Async trait seams for the three external services.
//!
//! The engine never talks to the network directly; it consumes these traits.
//! Production adapters (Elasticsearch-style index, OpenAI-compatible LLM,
//! HTTP embedding service) live in `callrank-server`; tests substitute
//! in-process fixtures.

use crate::document::Document;
use crate::error::BackendError;
use async_trait::async_trait;

/// One hit from the lexical index: the document plus its raw backend score
/// (BM25-style, unbounded).
#[derive(Debug, Clone)]
pub struct LexicalHit {
    pub document: Document,
    pub raw_score: f32,
}

/// Full-text retrieval backend (inverted-index / BM25-style service).
///
/// The only hard dependency of a search request: if this call fails, the
/// request fails.
#[async_trait]
pub trait LexicalBackend: Send + Sync {
    /// Returns up to `size` candidates for `query`, ranked by the backend's
    /// own scoring, best first.
    async fn top_candidates(&self, query: &str, size: usize) -> Result<Vec<LexicalHit>, BackendError>;
}

/// Dense-vector embedding service. Optional; absence deactivates the
/// semantic signal.
#[async_trait]
pub trait EmbeddingBackend: Send + Sync {
    /// Embeds a batch of texts in one round trip. The returned vectors are
    /// positionally aligned with `texts`.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError>;
}

/// Structured result of LLM query analysis.
#[derive(Debug, Clone)]
pub struct LlmAnalysis {
    /// Intent label; must parse via [`Intent::from_label`](crate::query::Intent::from_label)
    /// or the analysis is treated as malformed.
    pub intent: String,
    /// Extracted keywords.
    pub keywords: Vec<String>,
}

/// LLM used for intent classification and keyword extraction. Optional and
/// best-effort; every failure path falls back to the rule-based analyzer.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn extract(&self, query: &str) -> Result<LlmAnalysis, BackendError>;
}
