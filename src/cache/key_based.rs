//! Key-Based LRU Cache
//!
//! A single global LRU of product records keyed by id.

use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, LruMap, ProductCache, StatsCounters};
use crate::models::ProductRecord;

// == Key-Based LRU Cache ==
/// Global LRU bounded by a total entry count.
///
/// Every operation, including the type scan, runs under one lock.
#[derive(Debug)]
pub struct KeyBasedLruCache {
    entries: Mutex<LruMap<String, ProductRecord>>,
    stats: StatsCounters,
}

impl KeyBasedLruCache {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` records (minimum 1).
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

impl ProductCache for KeyBasedLruCache {
    fn get_by_id(&self, id: &str) -> Option<ProductRecord> {
        let found = self.entries.lock().get(id).cloned();
        self.stats.record_lookup(found.is_some());
        found
    }

    /// Linear scan of resident records with an exact type match.
    ///
    /// Only reflects what happens to be cached, so it is not a complete
    /// answer for the type.
    fn get_by_type(&self, product_type: &str) -> Vec<ProductRecord> {
        let entries = self.entries.lock();
        entries
            .values()
            .filter(|p| p.product_type == product_type)
            .cloned()
            .collect()
    }

    fn put(&self, product: &ProductRecord) {
        if !product.has_id() {
            warn!("Dropping cache write for product without id");
            return;
        }

        let evicted = self
            .entries
            .lock()
            .insert(product.id.clone(), product.clone());

        if let Some((evicted_id, _)) = evicted {
            self.stats.record_eviction();
            debug!("Evicted product {} from key-based cache", evicted_id);
        }
    }

    fn remove(&self, id: &str) {
        self.entries.lock().remove(id);
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
