//! Keyword density scoring with diminishing returns.

use crate::config;

/// Occurrences of each keyword divided by total word count, summed across
/// keywords, then passed through the saturating transform
/// `1 - 1/(1 + gain * density)`.
///
/// Word-boundary aware: matching happens on whole tokens, so "call" does not
/// match inside "recall". Additional repetitions yield diminishing returns
/// and long documents are not penalized purely for length. Empty keyword set
/// or empty text scores 0.
pub fn density_score(keywords: &[String], words: &[String]) -> f32 {
    if keywords.is_empty() || words.is_empty() {
        return 0.0;
    }

    let total = words.len() as f32;
    let density: f32 = keywords
        .iter()
        .map(|k| words.iter().filter(|w| *w == k).count() as f32 / total)
        .sum();

    1.0 - 1.0 / (1.0 + config::DENSITY_GAIN * density)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::tokenize_words;

    fn kw(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        assert_eq!(density_score(&[], &tokenize_words("some text")), 0.0);
        assert_eq!(density_score(&kw(&["call"]), &[]), 0.0);
    }

    #[test]
    fn test_no_match_scores_zero() {
        let words = tokenize_words("completely unrelated transcript");
        assert_eq!(density_score(&kw(&["refund"]), &words), 0.0);
    }

    #[test]
    fn test_more_occurrences_score_higher() {
        let sparse = tokenize_words("refund mentioned once in a long long long long transcript");
        let dense = tokenize_words("refund refund refund in a long long long long transcript");
        let k = kw(&["refund"]);
        assert!(density_score(&k, &dense) > density_score(&k, &sparse));
    }

    #[test]
    fn test_diminishing_returns() {
        let k = kw(&["refund"]);
        let once = tokenize_words("refund a b c");
        let twice = tokenize_words("refund refund b c");
        let thrice = tokenize_words("refund refund refund c");
        let d1 = density_score(&k, &once);
        let d2 = density_score(&k, &twice);
        let d3 = density_score(&k, &thrice);
        assert!(d2 - d1 > d3 - d2, "gains should shrink: {d1} {d2} {d3}");
    }

    #[test]
    fn test_word_boundary_aware() {
        let words = tokenize_words("recall recalls recalled");
        assert_eq!(density_score(&kw(&["call"]), &words), 0.0);
    }

    #[test]
    fn test_score_in_unit_range() {
        let words = tokenize_words("refund refund refund");
        let score = density_score(&kw(&["refund"]), &words);
        assert!((0.0..=1.0).contains(&score));
    }
}
