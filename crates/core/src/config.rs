//! Global configuration constants for callrank.
//!
//! All tuning parameters and input validation limits are defined here.
//! These are compile-time constants; runtime configuration (service URLs,
//! ports, model names) is handled via CLI arguments and environment
//! variables in the server binary.

use std::time::Duration;

/// Over-fetch multiplier applied to the requested result limit when pulling
/// candidates from the lexical index.
///
/// Re-ranking can only promote documents that were actually retrieved, so
/// the candidate pool must be larger than the final page.
pub const OVERFETCH_FACTOR: usize = 5;

/// Hard cap on the number of candidates requested from the lexical index,
/// regardless of `limit * OVERFETCH_FACTOR`.
pub const MAX_CANDIDATES: usize = 500;

/// Maximum number of results (`limit`) per search request.
pub const MAX_LIMIT: usize = 100;

/// Maximum length of a search query in characters.
pub const MAX_QUERY_LEN: usize = 1024;

/// Timeout for the lexical index call. Exceeding it fails the search request.
pub const RETRIEVAL_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the LLM query-analysis call. Exceeding it falls back to the
/// rule-based analyzer.
pub const LLM_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the batched embedding call. Exceeding it deactivates the
/// semantic signal for the request.
pub const EMBEDDING_TIMEOUT: Duration = Duration::from_secs(10);

/// Gain applied to raw keyword density before saturation.
///
/// Density is occurrences / total words, so raw values are tiny for long
/// transcripts; the gain shifts the saturating curve `1 - 1/(1 + g*d)` into
/// a useful range. One match per 25 words scores 0.5.
pub const DENSITY_GAIN: f32 = 25.0;

/// Word-distance scale for the proximity signal.
///
/// Score is `1 / (1 + (gap - 1) / scale)`: adjacent keywords score 1.0,
/// a gap of `scale + 1` words scores 0.5.
pub const PROXIMITY_SCALE: f32 = 4.0;

/// Decay rate for the position signal, `exp(-decay * relative_position)`.
///
/// A match at the very start of the transcript scores 1.0; a match halfway
/// through scores ~0.22.
pub const POSITION_DECAY: f32 = 3.0;

/// Scale of the aggregate relevance score returned to callers.
pub const SCORE_SCALE: f32 = 100.0;

/// Maximum characters of transcript text sent to the embedding service per
/// document (summary text is always included in full).
pub const EMBED_TEXT_MAX_CHARS: usize = 500;

/// Capacity of the per-engine LRU cache of search responses.
pub const SEARCH_CACHE_CAPACITY: usize = 256;

/// QA score threshold treated as a "high quality" call by the context
/// boost signal.
pub const QA_HIGH_SCORE: i64 = 80;

/// Default HTTP port for the server binary.
pub const DEFAULT_PORT: u16 = 8080;

/// Maximum HTTP request body size in bytes.
pub const MAX_REQUEST_BODY_BYTES: usize = 256 * 1024;

/// Maximum concurrent in-flight HTTP requests.
pub const MAX_CONCURRENT_REQUESTS: usize = 256;

/// Whole-request HTTP timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
