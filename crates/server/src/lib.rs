//! callrank-server — HTTP server for the callrank engine.
//!
//! Provides the REST API and the reqwest adapters for the three external
//! services (lexical index, embedding service, LLM). The ranking engine
//! itself lives in `callrank-core`.

/// REST API layer: Axum router, HTTP handlers, models.
pub mod api;
/// Outbound HTTP clients implementing the core backend traits.
pub mod clients;
