//! Proximity scoring: how close distinct matched keywords are.

use crate::config;
use std::collections::HashMap;

/// Minimum word distance between occurrences of two distinct keywords,
/// mapped through the inverse-distance transform
/// `1 / (1 + (gap - 1) / scale)`, so adjacent keywords score 1.0.
///
/// Documents matching fewer than two distinct keywords score 0: proximity
/// is undefined there, not an error.
pub fn proximity_score(positions: &HashMap<String, Vec<usize>>) -> f32 {
    if positions.len() < 2 {
        return 0.0;
    }

    // Merge all occurrences into one sorted list tagged by keyword; the
    // minimum window covering two distinct keywords is then the smallest
    // gap between adjacent entries with different tags.
    let mut merged: Vec<(usize, &str)> = positions
        .iter()
        .flat_map(|(kw, ps)| ps.iter().map(move |&p| (p, kw.as_str())))
        .collect();
    merged.sort_unstable();

    let mut min_gap: Option<usize> = None;
    for pair in merged.windows(2) {
        let ((p1, k1), (p2, k2)) = (pair[0], pair[1]);
        if k1 != k2 {
            let gap = p2 - p1;
            min_gap = Some(min_gap.map_or(gap, |g| g.min(gap)));
        }
    }

    match min_gap {
        Some(gap) => 1.0 / (1.0 + (gap.saturating_sub(1)) as f32 / config::PROXIMITY_SCALE),
        None => 0.0,
    }
}
