//! Position scoring: matches near the start of the transcript rank higher.

use crate::config;
use std::collections::HashMap;

/// Rewards the earliest occurrence of any keyword, normalized by document
/// length and mapped through `exp(-decay * relative_position)`.
///
/// A match on the very first word scores 1.0; absence of any match scores 0.
pub fn position_score(positions: &HashMap<String, Vec<usize>>, total_words: usize) -> f32 {
    if total_words == 0 {
        return 0.0;
    }
    let earliest = positions.values().flatten().copied().min();
    match earliest {
        Some(pos) => {
            let relative = pos as f32 / total_words as f32;
            (-config::POSITION_DECAY * relative).exp()
        }
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenize_words;
    use crate::scorers::keyword_positions;

    fn score(keywords: &[&str], text: &str) -> f32 {
        let kw: Vec<String> = keywords.iter().map(|s| s.to_string()).collect();
        let words = tokenize_words(text);
        position_score(&keyword_positions(&kw, &words), words.len())
    }

    #[test]
    fn test_no_match_scores_zero() {
        assert_eq!(score(&["refund"], "nothing relevant here"), 0.0);
    }

    #[test]
    fn test_empty_text_scores_zero() {
        assert_eq!(score(&["refund"], ""), 0.0);
    }

    #[test]
    fn test_first_word_match_scores_one() {
        assert_eq!(score(&["refund"], "refund was requested"), 1.0);
    }

    #[test]
    fn test_earlier_match_scores_higher() {
        let early = score(
            &["incoming"],
            "incoming call about an order placed last week by a customer",
        );
        let late = score(
            &["incoming"],
            "call about an order placed last week by a customer incoming",
        );
        assert!(early > late, "early={early} late={late}");
    }

    #[test]
    fn test_uses_earliest_of_all_keywords() {
        let s = score(&["alpha", "beta"], "beta x x x x x x x alpha");
        assert_eq!(s, 1.0);
    }
}
