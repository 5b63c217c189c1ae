//! Per-signal relevance scorers.
//!
//! Every scorer is a pure function of (query analysis, document) returning a
//! value in [0, 1], or `None` when the signal is inactive for that document.
//! Inactive signals are excluded from aggregation via weight renormalization,
//! never penalized. No scorer performs I/O.

/// Keyword density with diminishing returns.
pub mod density;
/// Verbatim phrase and bigram containment.
pub mod exact;
/// Metadata agreement with the inferred query intent.
pub mod context;
/// Earliest-match position reward.
pub mod position;
/// Minimum window between distinct matched keywords.
pub mod proximity;
/// Cosine similarity between query and document embeddings.
pub mod semantic;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// The closed set of relevance signals.
///
/// Weight configurations are validated against this set; the breakdown
/// returned with every result is keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    /// Normalized score from the lexical retrieval backend.
    Lexical,
    /// Embedding cosine similarity.
    Semantic,
    /// Keyword density in the transcript.
    KeywordDensity,
    /// Exact phrase / bigram containment.
    ExactMatch,
    /// Distance between matched keywords.
    Proximity,
    /// How early the first keyword appears.
    Position,
    /// Metadata agreement with query intent.
    ContextBoost,
}

impl Signal {
    /// All signals, in breakdown display order.
    pub const ALL: [Signal; 7] = [
        Signal::Lexical,
        Signal::Semantic,
        Signal::KeywordDensity,
        Signal::ExactMatch,
        Signal::Proximity,
        Signal::Position,
        Signal::ContextBoost,
    ];

    /// Stable string name, matching the serde representation and the keys
    /// accepted by `update_weights`.
    pub fn as_str(self) -> &'static str {
        match self {
            Signal::Lexical => "lexical",
            Signal::Semantic => "semantic",
            Signal::KeywordDensity => "keyword_density",
            Signal::ExactMatch => "exact_match",
            Signal::Proximity => "proximity",
            Signal::Position => "position",
            Signal::ContextBoost => "context_boost",
        }
    }
}

impl FromStr for Signal {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Signal::ALL
            .into_iter()
            .find(|sig| sig.as_str() == s)
            .ok_or(())
    }
}

/// Positions (word indices) of each keyword that occurs in `words`.
/// Keywords with no occurrence are omitted.
pub fn keyword_positions(keywords: &[String], words: &[String]) -> HashMap<String, Vec<usize>> {
    let mut positions: HashMap<String, Vec<usize>> = HashMap::new();
    for (i, word) in words.iter().enumerate() {
        if keywords.contains(word) {
            positions.entry(word.clone()).or_default().push(i);
        }
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenize_words;

    #[test]
    fn test_signal_from_str_round_trip() {
        for sig in Signal::ALL {
            assert_eq!(sig.as_str().parse::<Signal>(), Ok(sig));
        }
        assert!("bm42".parse::<Signal>().is_err());
    }

    #[test]
    fn test_keyword_positions() {
        let words = tokenize_words("the incoming call was an incoming call");
        let keywords = vec!["incoming".to_string(), "call".to_string()];
        let positions = keyword_positions(&keywords, &words);
        assert_eq!(positions["incoming"], vec![1, 5]);
        assert_eq!(positions["call"], vec![2, 6]);
    }

    #[test]
    fn test_keyword_positions_omits_absent_keywords() {
        let words = tokenize_words("hello world");
        let keywords = vec!["absent".to_string()];
        assert!(keyword_positions(&keywords, &words).is_empty());
    }
}
