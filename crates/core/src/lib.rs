//! Hybrid relevance engine for call-center dialogue search.
//!
//! Ranks dialogue records by combining a lexical retrieval score with
//! embedding similarity and a set of lexical-feature signals (keyword
//! density, exact match, proximity, position, intent-driven context boost)
//! under a configurable weighted aggregation. The crate is transport-free:
//! backends (lexical index, embedding service, LLM) are traits implemented
//! by the server crate.

pub mod aggregate;
pub mod analyzer;
pub mod backend;
pub mod cache;
pub mod config;
pub mod document;
pub mod engine;
pub mod error;
pub mod query;
pub mod retrieve;
pub mod scorers;
pub mod weights;

pub use aggregate::{ScoreBreakdown, SignalContribution};
pub use backend::{EmbeddingBackend, LexicalBackend, LexicalHit, LlmAnalysis, LlmBackend};
pub use document::{CallMetadata, Document};
pub use engine::{HybridSearchEngine, SearchResponse, SearchResult};
pub use error::{BackendError, SearchError};
pub use query::{Intent, QueryAnalysis};
pub use scorers::Signal;
pub use weights::WeightConfig;
