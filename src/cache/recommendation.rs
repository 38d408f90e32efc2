//! Recommendation Result Cache
//!
//! LRU of whole recommendation result lists keyed by a normalized query key.

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, LruMap, RecommendationCache, StatsCounters};
use crate::models::ProductRecord;

// == Composite Key Recommendation Cache ==
/// Thread-safe LRU of result lists.
///
/// Lists are copied on the way in and on the way out, under the lock.
#[derive(Debug)]
pub struct CompositeKeyRecommendationCache {
    entries: Mutex<LruMap<String, Vec<ProductRecord>>>,
    stats: StatsCounters,
}

impl CompositeKeyRecommendationCache {
    /// Creates a cache holding at most `capacity` result lists (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(LruMap::new(capacity)),
            stats: StatsCounters::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.entries.lock().capacity()
    }
}

impl RecommendationCache for CompositeKeyRecommendationCache {
    fn get(&self, key: &str) -> Option<Vec<ProductRecord>> {
        if key.is_empty() {
            return None;
        }
        let found = self.entries.lock().get(key).cloned();
        self.stats.record_lookup(found.is_some());
        found
    }

    fn put(&self, key: &str, value: &[ProductRecord]) {
        if key.is_empty() {
            warn!("Dropping recommendation cache write with empty key");
            return;
        }

        let evicted = self.entries.lock().insert(key.to_string(), value.to_vec());
        if let Some((evicted_key, _)) = evicted {
            self.stats.record_eviction();
            debug!("Evicted recommendation result for key {}", evicted_key);
        }
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }

    fn clear(&self) {
        self.entries.lock().clear();
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;

    #[test]
    fn test_put_copies_input() {
        let cache = CompositeKeyRecommendationCache::new(4);
        let mut results = vec![product("p1", "Toy", 10), product("p2", "Toy", 20)];

        cache.put("k", &results);
        results.push(product("p3", "Toy", 30));
        results[0].price = 1;

        let cached = cache.get("k").unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].price, 10);
    }

    #[test]
    fn test_get_returns_detached_copy() {
        let cache = CompositeKeyRecommendationCache::new(4);
        cache.put("k", &[product("p1", "Toy", 10)]);

        let mut first = cache.get("k").unwrap();
        first.clear();

        assert_eq!(cache.get("k").map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_empty_key_is_absent_and_ignored() {
        let cache = CompositeKeyRecommendationCache::new(4);
        cache.put("", &[product("p1", "Toy", 10)]);

        assert!(cache.is_empty());
        assert_eq!(cache.get(""), None);
    }

    #[test]
    fn test_empty_result_list_is_cached() {
        let cache = CompositeKeyRecommendationCache::new(4);
        cache.put("k", &[]);
        assert_eq!(cache.get("k"), Some(Vec::new()));
    }

    #[test]
    fn test_lru_eviction() {
        let cache = CompositeKeyRecommendationCache::new(2);
        cache.put("a", &[]);
        cache.put("b", &[]);
        assert!(cache.get("a").is_some());

        cache.put("c", &[]);

        assert!(cache.get("b").is_none());
        assert!(cache.get("a").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let cache = CompositeKeyRecommendationCache::new(4);
        cache.put("a", &[]);
        cache.put("b", &[]);

        cache.remove("a");
        assert!(cache.get("a").is_none());
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_capacity_clamped() {
        assert_eq!(CompositeKeyRecommendationCache::new(0).capacity(), 1);
    }
}
