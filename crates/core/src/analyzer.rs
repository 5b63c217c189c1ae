//! Query analysis: intent detection and keyword extraction.
//!
//! Two paths behind one contract: the configured LLM (primary, bounded
//! timeout) and a deterministic rule-based fallback. `analyze` never fails —
//! on any LLM problem it logs and degrades to the fallback.

use crate::backend::LlmBackend;
use crate::config;
use crate::query::{extract_keywords, normalize_tokens, Intent, QueryAnalysis};
use std::sync::Arc;
use tokio::time::timeout;
use tracing::warn;

const INCOMING_MARKERS: &[&str] = &["incoming", "inbound"];
const COMPLAINT_MARKERS: &[&str] = &[
    "complaint",
    "complaints",
    "unhappy",
    "dissatisfied",
    "angry",
    "problem",
    "problems",
];
const OPERATOR_MARKERS: &[&str] = &["operator", "manager", "agent"];
const CONDUCT_MARKERS: &[&str] = &["rude", "impolite", "unprofessional"];
const SALES_MARKERS: &[&str] = &["sale", "sales", "purchase", "buy", "order"];
const POSITIVE_MARKERS: &[&str] = &["satisfied", "empathy", "thanks", "praise"];

/// Analyzes raw query text into intent + keywords.
pub struct QueryAnalyzer {
    llm: Option<Arc<dyn LlmBackend>>,
}

impl QueryAnalyzer {
    pub fn new(llm: Option<Arc<dyn LlmBackend>>) -> Self {
        Self { llm }
    }

    /// Whether an LLM backend is configured.
    pub fn has_llm(&self) -> bool {
        self.llm.is_some()
    }

    /// Full query analysis. Never fails: the rule-based path is always
    /// available and deterministic.
    pub async fn analyze(&self, query: &str) -> QueryAnalysis {
        let normalized_tokens = normalize_tokens(query);

        if let Some(llm) = &self.llm {
            match timeout(config::LLM_TIMEOUT, llm.extract(query)).await {
                Ok(Ok(llm_analysis)) => {
                    if let Some(intent) = Intent::from_label(&llm_analysis.intent) {
                        let mut seen = std::collections::HashSet::new();
                        let mut keywords: Vec<String> = llm_analysis
                            .keywords
                            .iter()
                            .flat_map(|k| normalize_tokens(k))
                            .filter(|k| seen.insert(k.clone()))
                            .collect();
                        if keywords.is_empty() {
                            keywords = extract_keywords(&normalized_tokens);
                        }
                        return QueryAnalysis {
                            raw: query.to_string(),
                            normalized_tokens,
                            keywords,
                            intent,
                            degraded: false,
                        };
                    }
                    warn!(
                        intent = %llm_analysis.intent,
                        "LLM returned unknown intent label, using rule-based analysis"
                    );
                }
                Ok(Err(e)) => {
                    warn!(error = %e, "LLM analysis failed, using rule-based analysis");
                }
                Err(_) => {
                    warn!(
                        timeout = ?config::LLM_TIMEOUT,
                        "LLM analysis timed out, using rule-based analysis"
                    );
                }
            }
            return self.fallback(query, normalized_tokens, true);
        }

        self.fallback(query, normalized_tokens, false)
    }

    fn fallback(&self, query: &str, normalized_tokens: Vec<String>, degraded: bool) -> QueryAnalysis {
        let keywords = extract_keywords(&normalized_tokens);
        let intent = detect_intent(&normalized_tokens);
        QueryAnalysis {
            raw: query.to_string(),
            normalized_tokens,
            keywords,
            intent,
            degraded,
        }
    }
}

fn contains_any(tokens: &[String], markers: &[&str]) -> bool {
    tokens.iter().any(|t| markers.contains(&t.as_str()))
}

/// Rule-based intent detection over normalized tokens, checked in fixed
/// priority order so results are deterministic.
pub fn detect_intent(tokens: &[String]) -> Intent {
    if contains_any(tokens, INCOMING_MARKERS) {
        Intent::IncomingCalls
    } else if contains_any(tokens, COMPLAINT_MARKERS) {
        Intent::Complaint
    } else if contains_any(tokens, OPERATOR_MARKERS) && contains_any(tokens, CONDUCT_MARKERS) {
        Intent::OperatorConduct
    } else if contains_any(tokens, SALES_MARKERS) {
        Intent::Sales
    } else if contains_any(tokens, POSITIVE_MARKERS) {
        Intent::PositiveFeedback
    } else {
        Intent::Generic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{LlmAnalysis, LlmBackend};
    use crate::error::BackendError;
    use async_trait::async_trait;

    struct FixedLlm {
        intent: &'static str,
        keywords: Vec<&'static str>,
    }

    #[async_trait]
    impl LlmBackend for FixedLlm {
        async fn extract(&self, _query: &str) -> Result<LlmAnalysis, BackendError> {
            Ok(LlmAnalysis {
                intent: self.intent.to_string(),
                keywords: self.keywords.iter().map(|s| s.to_string()).collect(),
            })
        }
    }

    struct FailingLlm;

    #[async_trait]
    impl LlmBackend for FailingLlm {
        async fn extract(&self, _query: &str) -> Result<LlmAnalysis, BackendError> {
            Err(BackendError::Unreachable("connection refused".into()))
        }
    }

    fn toks(s: &str) -> Vec<String> {
        normalize_tokens(s)
    }

    #[test]
    fn test_detect_intent_priority_order() {
        assert_eq!(detect_intent(&toks("incoming calls")), Intent::IncomingCalls);
        assert_eq!(detect_intent(&toks("customer complaint")), Intent::Complaint);
        assert_eq!(
            detect_intent(&toks("rude operator")),
            Intent::OperatorConduct
        );
        assert_eq!(detect_intent(&toks("order status")), Intent::Sales);
        assert_eq!(
            detect_intent(&toks("satisfied customer")),
            Intent::PositiveFeedback
        );
        assert_eq!(detect_intent(&toks("billing question")), Intent::Generic);
    }

    #[test]
    fn test_complaint_markers_outrank_operator_conduct() {
        // A query carrying both a complaint marker and the operator+conduct
        // pair resolves to the higher-priority complaint intent.
        assert_eq!(
            detect_intent(&toks("rude operator complaint")),
            Intent::Complaint
        );
    }

    #[test]
    fn test_operator_marker_alone_is_not_conduct() {
        // An operator mention without a conduct word is not a conduct query.
        assert_eq!(detect_intent(&toks("operator schedule")), Intent::Generic);
    }

    #[tokio::test]
    async fn test_analyze_without_llm_is_not_degraded() {
        let analyzer = QueryAnalyzer::new(None);
        let analysis = analyzer.analyze("show me incoming calls").await;
        assert_eq!(analysis.intent, Intent::IncomingCalls);
        assert_eq!(analysis.keywords, vec!["incoming", "calls"]);
        assert!(!analysis.degraded);
    }

    #[tokio::test]
    async fn test_analyze_uses_llm_result() {
        let analyzer = QueryAnalyzer::new(Some(Arc::new(FixedLlm {
            intent: "complaint",
            keywords: vec!["refund", "angry"],
        })));
        let analysis = analyzer.analyze("people wanting money back").await;
        assert_eq!(analysis.intent, Intent::Complaint);
        assert_eq!(analysis.keywords, vec!["refund", "angry"]);
        assert!(!analysis.degraded);
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_llm_error() {
        let analyzer = QueryAnalyzer::new(Some(Arc::new(FailingLlm)));
        let analysis = analyzer.analyze("incoming calls").await;
        assert_eq!(analysis.intent, Intent::IncomingCalls);
        assert!(analysis.degraded);
    }

    #[tokio::test]
    async fn test_analyze_falls_back_on_unknown_intent_label() {
        let analyzer = QueryAnalyzer::new(Some(Arc::new(FixedLlm {
            intent: "weird_label",
            keywords: vec![],
        })));
        let analysis = analyzer.analyze("incoming calls").await;
        assert_eq!(analysis.intent, Intent::IncomingCalls);
        assert!(analysis.degraded);
    }
}
