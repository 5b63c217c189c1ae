//! Outbound HTTP clients implementing the core backend traits.
//!
//! One adapter per external service. Each owns a `reqwest::Client` (cheap to
//! clone, shares a connection pool) and translates transport problems into
//! [`BackendError`] so the engine's degradation policy applies uniformly.

/// Elasticsearch-compatible lexical retrieval client.
pub mod elastic;
/// Batched embedding service client.
pub mod embedding;
/// OpenAI-compatible LLM client for query analysis.
pub mod llm;

use callrank_core::BackendError;

/// Maps a reqwest transport error to the engine-facing error type.
pub(crate) fn transport_error(err: reqwest::Error) -> BackendError {
    if err.is_connect() {
        BackendError::Unreachable(err.to_string())
    } else {
        BackendError::Malformed(err.to_string())
    }
}

/// Rejects non-2xx responses, preserving the status and a short message.
pub(crate) async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, BackendError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = resp.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: message.chars().take(200).collect(),
    })
}
