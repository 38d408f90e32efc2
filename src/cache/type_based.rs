//! Type-Partitioned LRU Cache
//!
//! One bounded LRU per product type plus a flat id index for point lookups.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::cache::{CacheStats, LruMap, ProductCache, StatsCounters};
use crate::models::ProductRecord;

/// Total capacity is sliced into `capacity / PER_TYPE_DIVISOR` per type.
pub const PER_TYPE_DIVISOR: usize = 10;

type Partition = Arc<Mutex<LruMap<String, ProductRecord>>>;

// == Type-Based LRU Cache ==
/// Per-type LRU partitions with a shared id index.
///
/// Each partition holds at most `max(1, capacity / 10)` records regardless
/// of how many types exist. The index and the partitions always agree: an id
/// is in the index iff exactly the partition of its indexed type holds it.
///
/// Locking: a partition's mutex is taken first and index updates for that
/// partition happen while it is held. The index itself is a sharded
/// concurrent map, so point lookups never touch a partition lock.
#[derive(Debug)]
pub struct TypeBasedLruCache {
    per_type_capacity: usize,
    /// Lowercased type name to its partition
    partitions: DashMap<String, Partition>,
    /// Flat id to record index across all partitions
    index: DashMap<String, ProductRecord>,
    stats: StatsCounters,
}

fn partition_key(product_type: &str) -> String {
    product_type.trim().to_lowercase()
}

impl TypeBasedLruCache {
    // == Constructor ==
    /// Creates a cache with total `capacity` (minimum 1) split per type.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            per_type_capacity: (capacity / PER_TYPE_DIVISOR).max(1),
            partitions: DashMap::new(),
            index: DashMap::new(),
            stats: StatsCounters::new(),
        }
    }

    pub fn per_type_capacity(&self) -> usize {
        self.per_type_capacity
    }

    /// Returns the partition for `type_key`, creating it on first use.
    fn partition(&self, type_key: &str) -> Partition {
        let entry = self
            .partitions
            .entry(type_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(LruMap::new(self.per_type_capacity))));
        Arc::clone(entry.value())
    }

    /// Removes `id` from the `type_key` partition unless the index still
    /// places it there.
    fn drop_stale(&self, type_key: &str, id: &str) {
        let Some(partition) = self.partitions.get(type_key).map(|p| Arc::clone(p.value())) else {
            return;
        };
        let mut lru = partition.lock();
        let indexed_here = self
            .index
            .get(id)
            .is_some_and(|r| partition_key(&r.product_type) == type_key);
        if !indexed_here {
            lru.remove(id);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        use std::collections::HashSet;

        let mut held = HashSet::new();
        for partition in self.partitions.iter() {
            let lru = partition.value().lock();
            for id in lru.keys() {
                let indexed_here = self
                    .index
                    .get(id)
                    .is_some_and(|r| partition_key(&r.product_type) == *partition.key());
                if !indexed_here || !held.insert(id.clone()) {
                    return false;
                }
            }
        }
        held.len() == self.index.len()
    }
}

impl ProductCache for TypeBasedLruCache {
    /// Single index lookup; does not touch partition recency.
    fn get_by_id(&self, id: &str) -> Option<ProductRecord> {
        let found = self.index.get(id).map(|r| r.value().clone());
        self.stats.record_lookup(found.is_some());
        found
    }

    /// Snapshot of the whole partition for `product_type` (case-insensitive).
    fn get_by_type(&self, product_type: &str) -> Vec<ProductRecord> {
        let partition = self
            .partitions
            .get(&partition_key(product_type))
            .map(|p| Arc::clone(p.value()));

        let Some(partition) = partition else {
            return Vec::new();
        };
        let lru = partition.lock();
        lru.values().cloned().collect()
    }

    fn put(&self, product: &ProductRecord) {
        if !product.has_id() {
            warn!("Dropping cache write for product without id");
            return;
        }
        let type_key = partition_key(&product.product_type);
        let partition = self.partition(&type_key);

        let previous = {
            let mut lru = partition.lock();
            let previous = self.index.insert(product.id.clone(), product.clone());

            if let Some((evicted_id, _)) = lru.insert(product.id.clone(), product.clone()) {
                self.index
                    .remove_if(&evicted_id, |_, r| partition_key(&r.product_type) == type_key);
                self.stats.record_eviction();
                debug!(
                    "Evicted product {} from type partition '{}'",
                    evicted_id, type_key
                );
            }
            previous
        };

        // A record whose type changed must leave its old partition
        if let Some(previous) = previous {
            let previous_key = partition_key(&previous.product_type);
            if previous_key != type_key {
                self.drop_stale(&previous_key, &product.id);
            }
        }
    }

    fn remove(&self, id: &str) {
        loop {
            let Some(type_key) = self.index.get(id).map(|r| partition_key(&r.product_type))
            else {
                return;
            };
            let Some(partition) = self.partitions.get(&type_key).map(|p| Arc::clone(p.value()))
            else {
                self.index.remove(id);
                return;
            };

            let mut lru = partition.lock();
            let removed = self
                .index
                .remove_if(id, |_, r| partition_key(&r.product_type) == type_key);
            if removed.is_some() {
                lru.remove(id);
                return;
            }
            // The record moved to another type concurrently; retry
        }
    }

    /// Empties every partition together with its index entries.
    fn clear(&self) {
        let partitions: Vec<(String, Partition)> = self
            .partitions
            .iter()
            .map(|p| (p.key().clone(), Arc::clone(p.value())))
            .collect();

        for (type_key, partition) in partitions {
            let mut lru = partition.lock();
            for id in lru.keys() {
                self.index
                    .remove_if(id, |_, r| partition_key(&r.product_type) == type_key);
            }
            lru.clear();
        }
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.snapshot(self.len())
    }
}
