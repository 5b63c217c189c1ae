//! Bounded LRU cache of search responses.
//!
//! Keyed by (normalized query, limit, weight-configuration version). The
//! version in the key plus an explicit [`QueryCache::clear`] on every weight
//! update guarantee stale breakdowns are never served.

use lru::LruCache;
use parking_lot::Mutex;
use std::num::NonZeroUsize;

/// Cache key for one search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Normalized query (joined normalized tokens).
    pub query: String,
    pub limit: usize,
    pub weights_version: u64,
}

/// Fixed-capacity LRU map behind a mutex. Values are cheap clones
/// (typically `Arc`s).
pub struct QueryCache<V> {
    inner: Mutex<LruCache<CacheKey, V>>,
}

impl<V: Clone> QueryCache<V> {
    /// Creates a cache with the given capacity. A zero capacity collapses
    /// to capacity 1 rather than panicking.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<V> {
        self.inner.lock().get(key).cloned()
    }

    pub fn put(&self, key: CacheKey, value: V) {
        self.inner.lock().put(key, value);
    }

    /// Drops every entry. Called on weight updates.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(query: &str, version: u64) -> CacheKey {
        CacheKey {
            query: query.to_string(),
            limit: 10,
            weights_version: version,
        }
    }

    #[test]
    fn test_get_after_put() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        cache.put(key("incoming calls", 1), 42);
        assert_eq!(cache.get(&key("incoming calls", 1)), Some(42));
    }

    #[test]
    fn test_version_is_part_of_key() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        cache.put(key("incoming calls", 1), 42);
        assert_eq!(cache.get(&key("incoming calls", 2)), None);
    }

    #[test]
    fn test_capacity_evicts_least_recently_used() {
        let cache: QueryCache<u32> = QueryCache::new(2);
        cache.put(key("a", 1), 1);
        cache.put(key("b", 1), 2);
        cache.get(&key("a", 1));
        cache.put(key("c", 1), 3);
        assert_eq!(cache.get(&key("a", 1)), Some(1));
        assert_eq!(cache.get(&key("b", 1)), None);
    }

    #[test]
    fn test_clear() {
        let cache: QueryCache<u32> = QueryCache::new(4);
        cache.put(key("a", 1), 1);
        cache.clear();
        assert!(cache.is_empty());
    }
}
