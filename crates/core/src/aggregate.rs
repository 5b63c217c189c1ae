//! Weighted aggregation of per-signal scores into one relevance score.
//!
//! The aggregator renormalizes configured weights over the signals that are
//! actually active for a document, so the final score stays comparable
//! across documents regardless of which optional signals (semantic, context
//! boost) were available. There is no hardcoded N-way split.

use crate::config;
use crate::scorers::Signal;
use crate::weights::WeightConfig;
use serde::Serialize;
use std::collections::BTreeMap;

/// One signal's contribution to a result, reported in the breakdown.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SignalContribution {
    /// The signal's normalized score in [0, 1].
    pub score: f32,
    /// Effective weight after renormalization over active signals.
    /// Weights in a breakdown always sum to 1.
    pub weight: f32,
}

/// Per-signal contribution report accompanying a ranked result. `BTreeMap`
/// keeps serialization order deterministic.
pub type ScoreBreakdown = BTreeMap<Signal, SignalContribution>;

/// Combines per-signal scores (`None` = inactive) into a final score on the
/// 0–100 scale plus an explainable breakdown.
///
/// Effective weight of each active signal is its configured weight divided
/// by the configured-weight sum over active signals. Inactive signals are
/// excluded entirely — their weight mass is redistributed proportionally,
/// and they never appear in the breakdown. If no active signal carries
/// positive weight the document scores 0 with an empty breakdown.
pub fn aggregate(
    signals: &[(Signal, Option<f32>)],
    weights: &WeightConfig,
) -> (f32, ScoreBreakdown) {
    let active: Vec<(Signal, f32, f32)> = signals
        .iter()
        .filter_map(|&(signal, score)| score.map(|s| (signal, s, weights.weight(signal))))
        .filter(|&(_, _, w)| w > 0.0)
        .collect();

    let weight_sum: f32 = active.iter().map(|&(_, _, w)| w).sum();
    if weight_sum <= f32::EPSILON {
        return (0.0, ScoreBreakdown::new());
    }

    let mut breakdown = ScoreBreakdown::new();
    let mut total = 0.0f32;
    for (signal, score, weight) in active {
        let effective = weight / weight_sum;
        total += effective * score;
        breakdown.insert(
            signal,
            SignalContribution {
                score,
                weight: effective,
            },
        );
    }

    ((total * config::SCORE_SCALE).clamp(0.0, config::SCORE_SCALE), breakdown)
}
