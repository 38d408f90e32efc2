//! Cache Module
//!
//! In-process LRU caches sitting in front of the record store:
//! - [`KeyBasedLruCache`]: one global LRU keyed by product id
//! - [`TypeBasedLruCache`]: one bounded LRU per product type plus a flat id index
//! - [`CompositeKeyRecommendationCache`]: LRU of recommendation result lists
//!
//! All caches are shared across request handlers behind an `Arc` and never
//! fail: invalid writes are dropped and misses are `None`.

mod factory;
mod key_based;
mod lru;
mod query_key;
mod recommendation;
mod stats;
mod type_based;


use std::fmt::Debug;

use crate::models::ProductRecord;

// Re-export public types
pub use factory::{CacheFactory, CacheStrategy};
pub use key_based::KeyBasedLruCache;
pub use lru::LruMap;
pub use query_key::build_key;
pub use recommendation::CompositeKeyRecommendationCache;
pub use stats::{CacheStats, StatsCounters};
pub use type_based::TypeBasedLruCache;

// == Public Constants ==
/// Default total capacity of the point-lookup cache
pub const DEFAULT_CAPACITY: usize = 1000;

/// Default capacity of the recommendation result cache
pub const DEFAULT_RECOMMENDATION_CAPACITY: usize = 200;

// == Product Cache ==
/// Point-lookup cache of product records.
///
/// Values cross the boundary by copy: `put` clones the record and reads
/// return owned records.
pub trait ProductCache: Send + Sync + Debug {
    /// Looks up a record by id.
    fn get_by_id(&self, id: &str) -> Option<ProductRecord>;

    /// Returns the records of `product_type` currently resident.
    ///
    /// How complete the answer is depends on the strategy.
    fn get_by_type(&self, product_type: &str) -> Vec<ProductRecord>;

    /// Inserts or overwrites a record. Records without an id are ignored.
    fn put(&self, product: &ProductRecord);

    /// Removes a record by id. No-op if absent.
    fn remove(&self, id: &str);

    /// Drops every entry.
    fn clear(&self);

    /// Number of resident records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current hit/miss/eviction counters.
    fn stats(&self) -> CacheStats;
}

// == Recommendation Cache ==
/// Cache of recommendation result lists keyed by a normalized query key.
pub trait RecommendationCache: Send + Sync + Debug {
    /// Returns a copy of the cached list for `key`.
    fn get(&self, key: &str) -> Option<Vec<ProductRecord>>;

    /// Stores a copy of `value` under `key`. Empty keys are ignored.
    fn put(&self, key: &str, value: &[ProductRecord]);

    fn remove(&self, key: &str);

    fn clear(&self);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn stats(&self) -> CacheStats;
}
