//! Semantic similarity between query and document embeddings.

/// Cosine similarity rescaled from [-1, 1] to [0, 1].
///
/// Returns `None` when either vector is empty or the dimensions disagree —
/// the signal is inactive for that document, not zero.
pub fn semantic_score(query: &[f32], document: &[f32]) -> Option<f32> {
    if query.is_empty() || document.is_empty() || query.len() != document.len() {
        return None;
    }

    let mut dot = 0.0f32;
    let mut norm_q = 0.0f32;
    let mut norm_d = 0.0f32;
    for (a, b) in query.iter().zip(document) {
        dot += a * b;
        norm_q += a * a;
        norm_d += b * b;
    }

    let cosine = dot / (norm_q.sqrt() * norm_d.sqrt() + 1e-8);
    Some(((cosine + 1.0) / 2.0).clamp(0.0, 1.0))
}
