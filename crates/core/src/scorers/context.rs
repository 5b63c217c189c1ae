//! Context boost: structured metadata agreement with the inferred intent.

use crate::config;
use crate::document::CallMetadata;
use crate::query::Intent;

const SALES_TAGS: &[&str] = &["sales", "sale", "order", "purchase"];

/// Scores how well a document's metadata agrees with the query intent.
///
/// Each intent maps to a small set of metadata predicates with fixed credit
/// shares; the score is the sum of the shares of the predicates that hold,
/// so full agreement is 1.0 and partial agreement is graded. Returns `None`
/// for `Generic` — no predicate applies, so the signal is inactive for the
/// request rather than dragging every document to 0.
pub fn context_boost_score(intent: Intent, meta: &CallMetadata) -> Option<f32> {
    let score = match intent {
        Intent::Generic => return None,
        Intent::IncomingCalls => {
            let incoming = meta
                .call_type
                .as_deref()
                .is_some_and(|t| t.eq_ignore_ascii_case("incoming"));
            if incoming {
                1.0
            } else {
                0.0
            }
        }
        Intent::Complaint => {
            let mut s = 0.0;
            if meta.problem_call_has {
                s += 0.5;
            }
            if meta.qa_critical_violation {
                s += 0.3;
            }
            if meta.no_go_count > 0 {
                s += 0.2;
            }
            s
        }
        Intent::OperatorConduct => {
            let mut s = 0.0;
            if meta.qa_critical_violation {
                s += 0.6;
            }
            if meta.no_go_count > 0 {
                s += 0.4;
            }
            s
        }
        Intent::Sales => {
            let tagged = meta
                .tags
                .iter()
                .any(|t| SALES_TAGS.iter().any(|s| t.eq_ignore_ascii_case(s)));
            if tagged {
                1.0
            } else {
                0.0
            }
        }
        Intent::PositiveFeedback => {
            let mut s = 0.0;
            if meta.empathy_count > 0 {
                s += 0.6;
            }
            if meta.qa_total_score >= config::QA_HIGH_SCORE {
                s += 0.4;
            }
            s
        }
    };
    Some(score)
}
