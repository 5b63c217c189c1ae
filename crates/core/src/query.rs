//! Query normalization and intent taxonomy.
//!
//! Tokenizes raw query text by lowercasing, splitting on non-alphanumeric
//! characters, and deduplicating while preserving first-seen order. Keywords
//! are the normalized tokens minus stop words and single-character tokens.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::LazyLock;

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "an", "and", "are", "as", "at", "be", "but", "by", "for", "if", "in", "into", "is",
        "it", "no", "not", "of", "on", "or", "such", "that", "the", "their", "then", "there",
        "these", "they", "this", "to", "was", "will", "with",
        // Query-verb words that carry no retrieval signal
        "show", "find", "me", "where", "when", "which", "all",
    ]
    .into_iter()
    .collect()
});

/// Closed set of query intent labels.
///
/// Detected by the LLM when configured, or by the rule-based fallback in
/// [`QueryAnalyzer`](crate::analyzer::QueryAnalyzer). `Generic` means no
/// specific intent was recognized and deactivates the context boost signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Looking for incoming calls.
    IncomingCalls,
    /// Looking for customer complaints / dissatisfaction.
    Complaint,
    /// Looking for operator misconduct (rudeness, unprofessional behavior).
    OperatorConduct,
    /// Looking for sales or order-related calls.
    Sales,
    /// Looking for positive customer feedback.
    PositiveFeedback,
    /// No recognizable intent.
    Generic,
}

impl Intent {
    /// Stable string label, matching the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Intent::IncomingCalls => "incoming_calls",
            Intent::Complaint => "complaint",
            Intent::OperatorConduct => "operator_conduct",
            Intent::Sales => "sales",
            Intent::PositiveFeedback => "positive_feedback",
            Intent::Generic => "generic",
        }
    }

    /// Parses a label as produced by [`Intent::as_str`]. Used to interpret
    /// LLM responses; unknown labels return `None` and trigger the fallback.
    pub fn from_label(label: &str) -> Option<Intent> {
        match label.trim() {
            "incoming_calls" => Some(Intent::IncomingCalls),
            "complaint" => Some(Intent::Complaint),
            "operator_conduct" => Some(Intent::OperatorConduct),
            "sales" => Some(Intent::Sales),
            "positive_feedback" => Some(Intent::PositiveFeedback),
            "generic" => Some(Intent::Generic),
            _ => None,
        }
    }
}

/// Output of query analysis, consumed by the scorers.
#[derive(Debug, Clone)]
pub struct QueryAnalysis {
    /// The raw query text as received.
    pub raw: String,
    /// Lowercased, punctuation-stripped tokens, deduplicated in first-seen
    /// order.
    pub normalized_tokens: Vec<String>,
    /// Normalized tokens minus stop words; drives the keyword-based signals.
    pub keywords: Vec<String>,
    /// Detected intent.
    pub intent: Intent,
    /// True when the LLM was configured but failed and the rule-based
    /// fallback produced this analysis.
    pub degraded: bool,
}

/// Lowercase and split on non-alphanumeric characters, keeping duplicates.
/// Used for document text, where positions and counts matter.
pub fn tokenize_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalize query text: lowercase, strip punctuation, deduplicate while
/// preserving first-seen order.
pub fn normalize_tokens(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    tokenize_words(text)
        .into_iter()
        .filter(|t| seen.insert(t.clone()))
        .collect()
}

/// Derive keywords from normalized tokens: drop stop words and
/// single-character tokens.
pub fn extract_keywords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.len() > 1 && !STOP_WORDS.contains(t.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation_and_dedupes() {
        let tokens = normalize_tokens("Incoming, calls! incoming CALLS?");
        assert_eq!(tokens, vec!["incoming", "calls"]);
    }

    #[test]
    fn test_tokenize_words_keeps_duplicates() {
        let words = tokenize_words("call me, call me back");
        assert_eq!(words, vec!["call", "me", "call", "me", "back"]);
    }

    #[test]
    fn test_keywords_drop_stop_words() {
        let tokens = normalize_tokens("show me the incoming calls");
        let keywords = extract_keywords(&tokens);
        assert_eq!(keywords, vec!["incoming", "calls"]);
    }

    #[test]
    fn test_keywords_drop_single_chars() {
        let tokens = normalize_tokens("a b queue");
        let keywords = extract_keywords(&tokens);
        assert_eq!(keywords, vec!["queue"]);
    }

    #[test]
    fn test_intent_label_round_trip() {
        for intent in [
            Intent::IncomingCalls,
            Intent::Complaint,
            Intent::OperatorConduct,
            Intent::Sales,
            Intent::PositiveFeedback,
            Intent::Generic,
        ] {
            assert_eq!(Intent::from_label(intent.as_str()), Some(intent));
        }
        assert_eq!(Intent::from_label("nonsense"), None);
    }
}
