//! Hybrid search orchestrator.
//!
//! Drives the pipeline for one request: analyze query → retrieve candidates
//! → score each candidate with all applicable signals → aggregate → sort →
//! truncate. The analyzer's LLM call and the lexical retrieval are
//! independent and issued concurrently; the analyzer only degrades while
//! retrieval failure fails the request. Dropping the returned future
//! (client disconnect) cancels both in-flight calls.

use crate::aggregate::{aggregate, ScoreBreakdown};
use crate::analyzer::QueryAnalyzer;
use crate::backend::{EmbeddingBackend, LexicalBackend, LlmBackend};
use crate::cache::{CacheKey, QueryCache};
use crate::config;
use crate::document::Document;
use crate::error::SearchError;
use crate::query::{normalize_tokens, tokenize_words, QueryAnalysis};
use crate::retrieve::{Candidate, CandidateRetriever};
use crate::scorers::{
    context::context_boost_score, density::density_score, exact::exact_match_score,
    keyword_positions, position::position_score, proximity::proximity_score,
    semantic::semantic_score, Signal,
};
use crate::weights::{SharedWeights, WeightConfig};
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{info, warn};

/// One ranked search result: the document, its aggregate relevance score on
/// the 0–100 scale, the per-signal breakdown, and a short human-readable
/// reason. Immutable after construction.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub document: Arc<Document>,
    pub relevance_score: f32,
    pub breakdown: ScoreBreakdown,
    pub relevance_reason: String,
}

/// Response for one search call.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Ranked results, best first, truncated to the requested limit.
    pub results: Vec<SearchResult>,
    /// Number of candidates ranked before truncation.
    pub total: usize,
}

/// The hybrid scoring and aggregation engine.
///
/// Stateless per request apart from the shared weight configuration, which
/// each request snapshots once at the start. Safe to share behind an `Arc`
/// across concurrent requests.
pub struct HybridSearchEngine {
    analyzer: QueryAnalyzer,
    retriever: CandidateRetriever,
    embedder: Option<Arc<dyn EmbeddingBackend>>,
    weights: SharedWeights,
    cache: QueryCache<Arc<SearchResponse>>,
}

impl HybridSearchEngine {
    /// Creates an engine over the given backends. The lexical backend is
    /// required; LLM and embedding backends are optional and their absence
    /// simply deactivates the signals that depend on them.
    pub fn new(
        lexical: Arc<dyn LexicalBackend>,
        llm: Option<Arc<dyn LlmBackend>>,
        embedder: Option<Arc<dyn EmbeddingBackend>>,
    ) -> Self {
        Self {
            analyzer: QueryAnalyzer::new(llm),
            retriever: CandidateRetriever::new(lexical),
            embedder,
            weights: SharedWeights::default(),
            cache: QueryCache::new(config::SEARCH_CACHE_CAPACITY),
        }
    }

    /// Whether an embedding backend is configured.
    pub fn semantic_enabled(&self) -> bool {
        self.embedder.is_some()
    }

    /// Whether an LLM backend is configured for query analysis.
    pub fn llm_enabled(&self) -> bool {
        self.analyzer.has_llm()
    }

    /// The active weight table, for diagnostics.
    pub fn current_weights(&self) -> std::collections::BTreeMap<String, f32> {
        self.weights.snapshot().as_map()
    }

    /// Runs one search request.
    ///
    /// Identical inputs with no intervening weight update yield identical
    /// ordering and scores. Only lexical retrieval failure is fatal; every
    /// other external problem degrades the affected signal.
    pub async fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<Arc<SearchResponse>, SearchError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("query must not be empty".into()));
        }
        if trimmed.len() > config::MAX_QUERY_LEN {
            return Err(SearchError::InvalidQuery(format!(
                "query exceeds {} characters",
                config::MAX_QUERY_LEN
            )));
        }
        if limit == 0 || limit > config::MAX_LIMIT {
            return Err(SearchError::InvalidQuery(format!(
                "limit must be between 1 and {}",
                config::MAX_LIMIT
            )));
        }

        let weights = self.weights.snapshot();
        let cache_key = CacheKey {
            query: normalize_tokens(trimmed).join(" "),
            limit,
            weights_version: weights.version(),
        };
        if let Some(cached) = self.cache.get(&cache_key) {
            return Ok(cached);
        }

        // The two suspension points of the pipeline. Independent for a given
        // request: the analyzer's output is only consumed after both finish.
        let (analysis, retrieved) = tokio::join!(
            self.analyzer.analyze(trimmed),
            self.retriever.retrieve(trimmed, limit),
        );
        let candidates = retrieved?;

        let embeddings = self.fetch_embeddings(&analysis, &candidates).await;

        let mut scored: Vec<(SearchResult, usize)> = candidates
            .iter()
            .map(|candidate| {
                let doc_embedding = embedding_for(candidate, embeddings.as_ref());
                let (result, rank) = score_candidate(
                    &analysis,
                    candidate,
                    embeddings.as_ref().map(|(q, _)| q.as_slice()),
                    doc_embedding,
                    &weights,
                );
                (result, rank)
            })
            .collect();

        // Descending by score; ties fall back to the backend's original
        // lexical rank so output is deterministic across repeated calls.
        scored.sort_by(|(a, rank_a), (b, rank_b)| {
            OrderedFloat(b.relevance_score)
                .cmp(&OrderedFloat(a.relevance_score))
                .then(rank_a.cmp(rank_b))
        });

        let total = scored.len();
        let results: Vec<SearchResult> = scored
            .into_iter()
            .take(limit)
            .map(|(result, _)| result)
            .collect();

        info!(
            query = %trimmed,
            intent = %analysis.intent.as_str(),
            degraded = analysis.degraded,
            candidates = total,
            returned = results.len(),
            "search complete"
        );

        let response = Arc::new(SearchResponse { results, total });
        self.cache.put(cache_key, response.clone());
        Ok(response)
    }

    /// Validates and applies a weight update, invalidating cached results.
    /// Already-computed responses held by callers are unaffected.
    pub fn update_weights(&self, updates: &HashMap<String, f32>) -> Result<(), SearchError> {
        let version = self.weights.update(updates)?;
        self.cache.clear();
        info!(version, "weight configuration updated");
        Ok(())
    }

    /// One batched embedding call for the query plus every candidate that
    /// lacks a precomputed vector. Any failure deactivates the semantic
    /// signal for the whole request.
    async fn fetch_embeddings(
        &self,
        analysis: &QueryAnalysis,
        candidates: &[Candidate],
    ) -> Option<(Vec<f32>, HashMap<usize, Vec<f32>>)> {
        let embedder = self.embedder.as_ref()?;

        let mut texts = vec![analysis.raw.clone()];
        let mut missing: Vec<usize> = Vec::new();
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.document.embedding.is_none() {
                missing.push(i);
                texts.push(embedding_text(&candidate.document));
            }
        }

        let vectors = match timeout(config::EMBEDDING_TIMEOUT, embedder.embed(&texts)).await {
            Ok(Ok(vectors)) => vectors,
            Ok(Err(e)) => {
                warn!(error = %e, "embedding call failed, semantic signal inactive");
                return None;
            }
            Err(_) => {
                warn!(
                    timeout = ?config::EMBEDDING_TIMEOUT,
                    "embedding call timed out, semantic signal inactive"
                );
                return None;
            }
        };

        if vectors.len() != texts.len() {
            warn!(
                expected = texts.len(),
                got = vectors.len(),
                "embedding count mismatch, semantic signal inactive"
            );
            return None;
        }

        let mut iter = vectors.into_iter();
        let query_embedding = iter.next()?;
        let fetched: HashMap<usize, Vec<f32>> = missing.into_iter().zip(iter).collect();
        Some((query_embedding, fetched))
    }
}

/// Text sent to the embedding service for a document: the summary plus a
/// bounded prefix of the transcript.
fn embedding_text(doc: &Document) -> String {
    let prefix: String = doc.text_full.chars().take(config::EMBED_TEXT_MAX_CHARS).collect();
    if doc.text_summary.is_empty() {
        prefix
    } else {
        format!("{} {}", doc.text_summary, prefix)
    }
}

fn embedding_for<'a>(
    candidate: &'a Candidate,
    embeddings: Option<&'a (Vec<f32>, HashMap<usize, Vec<f32>>)>,
) -> Option<&'a [f32]> {
    if let Some(own) = candidate.document.embedding.as_deref() {
        return Some(own);
    }
    embeddings
        .and_then(|(_, fetched)| fetched.get(&candidate.rank))
        .map(Vec::as_slice)
}

/// Scores one candidate with every applicable signal and aggregates. Pure:
/// no I/O, no shared state beyond the weight snapshot.
fn score_candidate(
    analysis: &QueryAnalysis,
    candidate: &Candidate,
    query_embedding: Option<&[f32]>,
    doc_embedding: Option<&[f32]>,
    weights: &WeightConfig,
) -> (SearchResult, usize) {
    let doc = &candidate.document;
    let words = tokenize_words(doc.scoring_text());
    let positions = keyword_positions(&analysis.keywords, &words);

    let semantic = match (query_embedding, doc_embedding) {
        (Some(q), Some(d)) => semantic_score(q, d),
        _ => None,
    };

    let signals = [
        (Signal::Lexical, Some(candidate.lexical_norm)),
        (Signal::Semantic, semantic),
        (
            Signal::KeywordDensity,
            Some(density_score(&analysis.keywords, &words)),
        ),
        (
            Signal::ExactMatch,
            Some(exact_match_score(
                &analysis.normalized_tokens,
                &analysis.keywords,
                &words,
            )),
        ),
        (Signal::Proximity, Some(proximity_score(&positions))),
        (Signal::Position, Some(position_score(&positions, words.len()))),
        (
            Signal::ContextBoost,
            context_boost_score(analysis.intent, &doc.metadata),
        ),
    ];

    let (relevance_score, breakdown) = aggregate(&signals, weights);
    let relevance_reason = relevance_reason(&breakdown);

    (
        SearchResult {
            document: doc.clone(),
            relevance_score,
            breakdown,
            relevance_reason,
        },
        candidate.rank,
    )
}

/// Short explanation assembled from the dominant breakdown entries.
fn relevance_reason(breakdown: &ScoreBreakdown) -> String {
    let mut reasons: Vec<&str> = Vec::new();
    let score_of = |s: Signal| breakdown.get(&s).map_or(0.0, |c| c.score);

    if score_of(Signal::ExactMatch) >= 0.99 {
        reasons.push("exact phrase match");
    }
    if score_of(Signal::ContextBoost) >= 0.5 {
        reasons.push("matches query intent");
    }
    if score_of(Signal::KeywordDensity) >= 0.5 {
        reasons.push("high keyword density");
    }
    if score_of(Signal::Semantic) >= 0.75 {
        reasons.push("strong semantic similarity");
    }
    if score_of(Signal::Proximity) >= 0.6 {
        reasons.push("query terms appear close together");
    }

    if reasons.is_empty() {
        "relevant across combined signals".to_string()
    } else {
        reasons.join(", ")
    }
}
