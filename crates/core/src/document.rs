//! Core document types for callrank.
//!
//! A [`Document`] is one call-center dialogue record as returned by the
//! lexical index: full transcript, summary, structured QA metadata, and an
//! optional precomputed embedding vector. Metadata fields all default when
//! absent so that a partially indexed record still ranks — a missing field
//! only deactivates the signals that read it.

use serde::{Deserialize, Serialize};

/// Structured metadata attached to a call record.
///
/// Produced by the upstream QA pipeline and stored alongside the transcript
/// in the lexical index. Consumed by the context boost signal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallMetadata {
    /// Call direction, e.g. `"incoming"` or `"outgoing"`. Free-form because
    /// the index mapping is not under this engine's control.
    #[serde(default)]
    pub call_type: Option<String>,
    /// Name of the operator who handled the call.
    #[serde(default)]
    pub operator_name: String,
    /// Topic tags assigned during ingestion.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Total QA score for the call (0–100).
    #[serde(default)]
    pub qa_total_score: i64,
    /// Whether QA flagged a critical violation.
    #[serde(default)]
    pub qa_critical_violation: bool,
    /// Whether the call was classified as a problem call.
    #[serde(default)]
    pub problem_call_has: bool,
    /// Number of empathy markers detected in the dialogue.
    #[serde(default)]
    pub empathy_count: u32,
    /// Number of "no-go" phrases detected in the dialogue.
    #[serde(default)]
    pub no_go_count: u32,
}

/// One call dialogue record.
///
/// Immutable once constructed; the engine shares it across scorers via
/// `Arc` and never mutates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Unique call identifier, stable across re-indexing.
    pub call_id: String,
    /// Full transcript text.
    #[serde(default)]
    pub text_full: String,
    /// Short summary of the call.
    #[serde(default)]
    pub text_summary: String,
    /// Structured QA metadata.
    #[serde(flatten)]
    pub metadata: CallMetadata,
    /// Precomputed embedding vector, present only if the embedding pipeline
    /// populated it. Absence deactivates the semantic signal for this
    /// document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embedding: Option<Vec<f32>>,
}

impl Document {
    /// Text used for keyword-based scoring: the full transcript, falling
    /// back to the summary when the transcript is empty.
    pub fn scoring_text(&self) -> &str {
        if self.text_full.is_empty() {
            &self.text_summary
        } else {
            &self.text_full
        }
    }
}
