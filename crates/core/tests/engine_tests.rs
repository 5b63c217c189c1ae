//! End-to-end engine tests over in-process backend fixtures.

use async_trait::async_trait;
use callrank_core::{
    BackendError, Document, EmbeddingBackend, HybridSearchEngine, LexicalBackend, LexicalHit,
    SearchError, Signal,
};
use std::collections::HashMap;
use std::sync::Arc;

struct FixtureBackend {
    hits: Vec<(serde_json::Value, f32)>,
}

#[async_trait]
impl LexicalBackend for FixtureBackend {
    async fn top_candidates(
        &self,
        _query: &str,
        size: usize,
    ) -> Result<Vec<LexicalHit>, BackendError> {
        Ok(self
            .hits
            .iter()
            .take(size)
            .map(|(value, raw_score)| LexicalHit {
                document: serde_json::from_value::<Document>(value.clone()).unwrap(),
                raw_score: *raw_score,
            })
            .collect())
    }
}

struct DownBackend;

#[async_trait]
impl LexicalBackend for DownBackend {
    async fn top_candidates(
        &self,
        _query: &str,
        _size: usize,
    ) -> Result<Vec<LexicalHit>, BackendError> {
        Err(BackendError::Unreachable("connection refused".into()))
    }
}

/// Deterministic 2-d embedder: texts mentioning "refund" map to one axis,
/// everything else to the other.
struct AxisEmbedder;

#[async_trait]
impl EmbeddingBackend for AxisEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, BackendError> {
        Ok(texts
            .iter()
            .map(|t| {
                if t.contains("refund") {
                    vec![1.0, 0.0]
                } else {
                    vec![0.0, 1.0]
                }
            })
            .collect())
    }
}

fn doc(id: &str, text: &str) -> serde_json::Value {
    serde_json::json!({ "call_id": id, "text_full": text })
}

fn lexical_only_engine(hits: Vec<(serde_json::Value, f32)>) -> HybridSearchEngine {
    HybridSearchEngine::new(Arc::new(FixtureBackend { hits }), None, None)
}

#[tokio::test]
async fn test_search_is_idempotent_and_cached() {
    let engine = lexical_only_engine(vec![
        (doc("a", "incoming calls were routed this morning"), 2.0),
        (doc("b", "a quiet afternoon with no activity"), 1.0),
    ]);

    let first = engine.search("incoming calls", 10).await.unwrap();
    let second = engine.search("incoming calls", 10).await.unwrap();

    // Second call is served from cache: the very same response.
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.results.len(), 2);
    assert_eq!(first.results[0].document.call_id, "a");
}

#[tokio::test]
async fn test_semantic_signal_absent_without_embedder() {
    let engine = lexical_only_engine(vec![(doc("a", "incoming calls"), 1.0)]);
    let response = engine.search("incoming calls", 5).await.unwrap();

    let breakdown = &response.results[0].breakdown;
    assert!(!breakdown.contains_key(&Signal::Semantic));
    let weight_sum: f32 = breakdown.values().map(|c| c.weight).sum();
    assert!((weight_sum - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn test_retrieval_failure_fails_the_request() {
    let engine = HybridSearchEngine::new(Arc::new(DownBackend), None, None);
    let err = engine.search("incoming calls", 5).await.unwrap_err();
    assert!(matches!(err, SearchError::Retrieval(_)));
}

#[tokio::test]
async fn test_equal_scores_break_ties_by_lexical_rank() {
    // Identical text and identical raw scores: every signal agrees, so the
    // backend's original order must be preserved.
    let engine = lexical_only_engine(vec![
        (doc("first", "billing question about the invoice"), 3.0),
        (doc("second", "billing question about the invoice"), 3.0),
        (doc("third", "billing question about the invoice"), 3.0),
    ]);
    let response = engine.search("billing question", 10).await.unwrap();
    let ids: Vec<&str> = response
        .results
        .iter()
        .map(|r| r.document.call_id.as_str())
        .collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_reranking_overrides_backend_order() {
    // Equal raw scores, but "incoming calls" opens one transcript and is
    // buried in the other. Lexical-feature signals must reorder.
    let engine = lexical_only_engine(vec![
        (
            doc(
                "late",
                "the morning queue was quiet until several incoming calls arrived",
            ),
            2.0,
        ),
        (
            doc("early", "incoming calls were routed to the queue this morning"),
            2.0,
        ),
    ]);
    let response = engine.search("incoming calls", 10).await.unwrap();
    assert_eq!(response.results[0].document.call_id, "early");
    assert!(response.results[0].relevance_score > response.results[1].relevance_score);
}

#[tokio::test]
async fn test_semantic_signal_reranks_with_embedder() {
    let engine = HybridSearchEngine::new(
        Arc::new(FixtureBackend {
            hits: vec![
                (doc("other", "customer asked about opening hours"), 2.0),
                (doc("match", "customer demanded a refund immediately"), 2.0),
            ],
        }),
        None,
        Some(Arc::new(AxisEmbedder)),
    );
    let response = engine.search("refund", 10).await.unwrap();

    assert_eq!(response.results[0].document.call_id, "match");
    assert!(response.results[0]
        .breakdown
        .contains_key(&Signal::Semantic));
}

#[tokio::test]
async fn test_context_boost_active_for_specific_intent() {
    let incoming = serde_json::json!({
        "call_id": "in",
        "text_full": "customer reached the line today",
        "call_type": "incoming",
    });
    let outgoing = serde_json::json!({
        "call_id": "out",
        "text_full": "customer reached the line today",
        "call_type": "outgoing",
    });
    let engine = lexical_only_engine(vec![(outgoing, 1.0), (incoming, 1.0)]);

    let response = engine.search("incoming calls", 10).await.unwrap();
    assert_eq!(response.results[0].document.call_id, "in");
    let boost = &response.results[0].breakdown[&Signal::ContextBoost];
    assert_eq!(boost.score, 1.0);
}

#[tokio::test]
async fn test_context_boost_inactive_for_generic_intent() {
    let engine = lexical_only_engine(vec![(doc("a", "billing question"), 1.0)]);
    let response = engine.search("billing question", 5).await.unwrap();
    assert!(!response.results[0]
        .breakdown
        .contains_key(&Signal::ContextBoost));
}

#[tokio::test]
async fn test_truncation_reports_full_total() {
    let hits = (0..8)
        .map(|i| (doc(&format!("c{i}"), "billing question"), 8.0 - i as f32))
        .collect();
    let engine = lexical_only_engine(hits);
    let response = engine.search("billing question", 3).await.unwrap();
    assert_eq!(response.results.len(), 3);
    assert_eq!(response.total, 8);
}

#[tokio::test]
async fn test_invalid_queries_rejected() {
    let engine = lexical_only_engine(vec![]);

    assert!(matches!(
        engine.search("   ", 5).await.unwrap_err(),
        SearchError::InvalidQuery(_)
    ));
    assert!(matches!(
        engine.search("ok", 0).await.unwrap_err(),
        SearchError::InvalidQuery(_)
    ));
    assert!(matches!(
        engine.search("ok", 10_000).await.unwrap_err(),
        SearchError::InvalidQuery(_)
    ));
    let long = "x".repeat(5000);
    assert!(matches!(
        engine.search(&long, 5).await.unwrap_err(),
        SearchError::InvalidQuery(_)
    ));
}

#[tokio::test]
async fn test_update_weights_invalidates_cache() {
    let engine = lexical_only_engine(vec![
        (doc("a", "incoming calls were routed this morning"), 2.0),
        (doc("b", "a quiet afternoon"), 1.0),
    ]);

    let before = engine.search("incoming calls", 10).await.unwrap();
    engine
        .update_weights(&HashMap::from([("lexical".to_string(), 0.9)]))
        .unwrap();
    let after = engine.search("incoming calls", 10).await.unwrap();

    // New configuration, freshly computed response.
    assert!(!Arc::ptr_eq(&before, &after));
    assert_eq!(engine.current_weights()["lexical"], 0.9);
}

#[tokio::test]
async fn test_rejected_weight_update_changes_nothing() {
    let engine = lexical_only_engine(vec![(doc("a", "incoming calls"), 1.0)]);
    let before = engine.current_weights();

    let err = engine
        .update_weights(&HashMap::from([("page_rank".to_string(), 0.5)]))
        .unwrap_err();
    assert!(matches!(err, SearchError::Configuration(_)));
    assert_eq!(engine.current_weights(), before);

    // Cached entries survive a rejected update.
    let first = engine.search("incoming calls", 5).await.unwrap();
    let _ = engine.update_weights(&HashMap::from([("lexical".to_string(), -1.0)]));
    let second = engine.search("incoming calls", 5).await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_empty_candidate_set_is_empty_response() {
    let engine = lexical_only_engine(vec![]);
    let response = engine.search("anything at all", 5).await.unwrap();
    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}
