//! Candidate retrieval from the lexical index.
//!
//! Over-fetches `limit * OVERFETCH_FACTOR` candidates so that re-ranking can
//! change the final top-N, and min-max normalizes the backend's raw scores
//! into [0, 1]. Retrieval failure is the one hard-failure point of a search
//! request.

use crate::backend::LexicalBackend;
use crate::config;
use crate::error::{BackendError, SearchError};
use crate::document::Document;
use std::sync::Arc;
use tokio::time::timeout;

/// One retrieval candidate with its normalized lexical score and original
/// backend rank (0-based, used as the deterministic tie-breaker).
#[derive(Debug, Clone)]
pub struct Candidate {
    pub document: Arc<Document>,
    /// Raw backend score, unbounded. Kept for diagnostics only.
    pub raw_score: f32,
    /// Min-max normalized score in [0, 1] over this candidate set.
    pub lexical_norm: f32,
    /// Rank assigned by the backend (0 = best).
    pub rank: usize,
}

/// Fetches and normalizes the candidate set for a query.
pub struct CandidateRetriever {
    backend: Arc<dyn LexicalBackend>,
    overfetch: usize,
}

impl CandidateRetriever {
    pub fn new(backend: Arc<dyn LexicalBackend>) -> Self {
        Self {
            backend,
            overfetch: config::OVERFETCH_FACTOR,
        }
    }

    /// Retrieves the candidate set for `query`. Hard failure on backend
    /// error or timeout — there is no local fallback index.
    pub async fn retrieve(&self, query: &str, limit: usize) -> Result<Vec<Candidate>, SearchError> {
        let size = limit
            .saturating_mul(self.overfetch)
            .min(config::MAX_CANDIDATES);

        let hits = match timeout(
            config::RETRIEVAL_TIMEOUT,
            self.backend.top_candidates(query, size),
        )
        .await
        {
            Ok(Ok(hits)) => hits,
            Ok(Err(e)) => return Err(SearchError::Retrieval(e)),
            Err(_) => {
                return Err(SearchError::Retrieval(BackendError::Timeout(
                    config::RETRIEVAL_TIMEOUT,
                )))
            }
        };

        Ok(normalize_hits(hits))
    }
}

/// Min-max scaling over the returned set. When all raw scores are identical
/// the range is zero and every candidate degrades to a constant 1.0.
fn normalize_hits(hits: Vec<crate::backend::LexicalHit>) -> Vec<Candidate> {
    let (min, max) = hits.iter().fold((f32::MAX, f32::MIN), |(lo, hi), h| {
        (lo.min(h.raw_score), hi.max(h.raw_score))
    });
    let range = max - min;

    hits.into_iter()
        .enumerate()
        .map(|(rank, hit)| {
            let lexical_norm = if range < f32::EPSILON {
                1.0
            } else {
                (hit.raw_score - min) / range
            };
            Candidate {
                document: Arc::new(hit.document),
                raw_score: hit.raw_score,
                lexical_norm,
                rank,
            }
        })
        .collect()
}
