//! Error taxonomy for the ranking engine.
//!
//! Only two conditions abort a search request: invalid caller input and a
//! failed lexical retrieval. Everything else (LLM failure, missing
//! embeddings, malformed document metadata) degrades to a signal being
//! inactive for the affected documents and is reported via `tracing`.

use std::time::Duration;
use thiserror::Error;

/// Errors returned by external service adapters.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The service could not be reached at all.
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    /// The service did not respond within the configured deadline.
    #[error("backend timed out after {0:?}")]
    Timeout(Duration),
    /// The service responded with a non-success status.
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body could not be parsed into the expected shape.
    #[error("malformed backend response: {0}")]
    Malformed(String),
}

/// Errors surfaced to callers of [`HybridSearchEngine`](crate::engine::HybridSearchEngine).
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query or limit failed validation before any work was done.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    /// A weight update referenced an unknown signal or an invalid value.
    /// The previously active configuration remains in effect.
    #[error("invalid weight configuration: {0}")]
    Configuration(String),
    /// The lexical index call failed. Fatal for the search request: without
    /// candidates there is nothing to rank.
    #[error("lexical retrieval failed: {0}")]
    Retrieval(#[source] BackendError),
}
