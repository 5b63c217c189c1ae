//! Signal weight configuration with atomic replacement.
//!
//! The active [`WeightConfig`] is process-wide state. Requests snapshot it
//! once at the start (an `Arc` clone) and use that snapshot throughout, so a
//! concurrent update can never tear a single request's breakdown. Updates
//! validate fully before swapping; a rejected update leaves the previous
//! configuration active.

use crate::error::SearchError;
use crate::scorers::Signal;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Default weights, tuned on the call-center corpus. They intentionally sum
/// to more than 1; the aggregator renormalizes over active signals.
const DEFAULT_WEIGHTS: [(Signal, f32); 7] = [
    (Signal::Lexical, 0.30),
    (Signal::Semantic, 0.25),
    (Signal::KeywordDensity, 0.25),
    (Signal::ExactMatch, 0.15),
    (Signal::ContextBoost, 0.08),
    (Signal::Proximity, 0.05),
    (Signal::Position, 0.02),
];

/// One immutable weight configuration, identified by a version number.
///
/// The version participates in the search-result cache key, so results
/// computed under an older configuration can never be served after an
/// update.
#[derive(Debug, Clone)]
pub struct WeightConfig {
    weights: BTreeMap<Signal, f32>,
    version: u64,
}

impl WeightConfig {
    /// Configured weight for a signal; signals absent from the map weigh 0.
    pub fn weight(&self, signal: Signal) -> f32 {
        self.weights.get(&signal).copied().unwrap_or(0.0)
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The full weight table, for diagnostics and API responses.
    pub fn as_map(&self) -> BTreeMap<String, f32> {
        self.weights
            .iter()
            .map(|(s, w)| (s.as_str().to_string(), *w))
            .collect()
    }
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS.into_iter().collect(),
            version: 1,
        }
    }
}

/// Shared handle to the active configuration.
pub struct SharedWeights {
    current: RwLock<Arc<WeightConfig>>,
}

impl SharedWeights {
    pub fn new(config: WeightConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The configuration snapshot for one request. Cheap (`Arc` clone).
    pub fn snapshot(&self) -> Arc<WeightConfig> {
        self.current.read().clone()
    }

    /// Validates `updates` and atomically replaces the active configuration
    /// with the current one overlaid by the given entries, bumping the
    /// version. Returns the new version.
    ///
    /// Rejected entirely (previous configuration stays active) when any key
    /// is not a known signal name or any value is negative or non-finite.
    pub fn update(&self, updates: &HashMap<String, f32>) -> Result<u64, SearchError> {
        let mut parsed: Vec<(Signal, f32)> = Vec::with_capacity(updates.len());
        for (key, &value) in updates {
            let signal = key.parse::<Signal>().map_err(|_| {
                SearchError::Configuration(format!("unknown signal '{key}'"))
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(SearchError::Configuration(format!(
                    "weight for '{key}' must be a non-negative finite number, got {value}"
                )));
            }
            parsed.push((signal, value));
        }

        let mut current = self.current.write();
        let mut weights = current.weights.clone();
        for (signal, value) in parsed {
            weights.insert(signal, value);
        }
        let version = current.version + 1;
        *current = Arc::new(WeightConfig { weights, version });
        Ok(version)
    }
}

impl Default for SharedWeights {
    fn default() -> Self {
        Self::new(WeightConfig::default())
    }
}
