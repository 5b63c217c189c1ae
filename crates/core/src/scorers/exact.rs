//! Exact phrase and keyword bigram containment.

use std::collections::HashSet;

/// Graded verbatim-match bonus.
///
/// Full credit (1.0) when the normalized query phrase appears as a
/// contiguous word sequence in the document. Otherwise partial credit:
/// - `0.8 * ratio` when a majority of in-order keyword bigrams appear
///   contiguously in the document,
/// - 0.5 when every keyword is present somewhere (no order),
/// whichever is higher. 0 when neither holds.
pub fn exact_match_score(
    normalized_query: &[String],
    keywords: &[String],
    words: &[String],
) -> f32 {
    if normalized_query.is_empty() || words.is_empty() {
        return 0.0;
    }

    if contains_sequence(words, normalized_query) {
        return 1.0;
    }

    let bigram_component = if keywords.len() >= 2 {
        let doc_bigrams: HashSet<(&str, &str)> = words
            .windows(2)
            .map(|w| (w[0].as_str(), w[1].as_str()))
            .collect();
        let total = keywords.len() - 1;
        let matched = keywords
            .windows(2)
            .filter(|b| doc_bigrams.contains(&(b[0].as_str(), b[1].as_str())))
            .count();
        let ratio = matched as f32 / total as f32;
        if ratio >= 0.5 {
            0.8 * ratio
        } else {
            0.0
        }
    } else {
        0.0
    };

    let all_present = !keywords.is_empty() && {
        let doc_words: HashSet<&str> = words.iter().map(String::as_str).collect();
        keywords.iter().all(|k| doc_words.contains(k.as_str()))
    };

    bigram_component.max(if all_present { 0.5 } else { 0.0 })
}

fn contains_sequence(words: &[String], phrase: &[String]) -> bool {
    if phrase.len() > words.len() {
        return false;
    }
    words.windows(phrase.len()).any(|w| w == phrase)
}
