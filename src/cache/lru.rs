//! LRU Map Module
//!
//! Bounded map ordered by access recency, used by every cache strategy.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

// == LRU Map ==
/// A capacity-bounded map that evicts its least recently used entry.
///
/// Recency is tracked with a monotonically increasing tick:
/// - every entry remembers the tick of its last touch
/// - `order` maps ticks back to keys, so the smallest tick is the LRU entry
///
/// Touch, insert, remove and eviction are all `O(log n)`.
#[derive(Debug)]
pub struct LruMap<K, V> {
    /// Key-value storage with the tick of the last touch
    entries: HashMap<K, (V, u64)>,
    /// Keys by access tick, oldest first
    order: BTreeMap<u64, K>,
    /// Next tick to hand out
    tick: u64,
    /// Maximum number of resident entries (at least 1)
    capacity: usize,
}

impl<K, V> LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    // == Constructor ==
    /// Creates an empty map holding at most `capacity` entries.
    ///
    /// A capacity of zero is clamped to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: BTreeMap::new(),
            tick: 0,
            capacity: capacity.max(1),
        }
    }

    fn next_tick(&mut self) -> u64 {
        let tick = self.tick;
        self.tick += 1;
        tick
    }

    // == Get ==
    /// Returns the value for `key` and marks it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let tick = self.next_tick();
        let (value, last) = self.entries.get_mut(key)?;
        let previous = *last;
        if let Some(k) = self.order.remove(&previous) {
            self.order.insert(tick, k);
        }
        *last = tick;
        Some(value)
    }

    // == Peek ==
    /// Returns the value for `key` without touching its recency.
    #[cfg(test)]
    pub(crate) fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.get(key).map(|(value, _)| value)
    }

    // == Insert ==
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// If the insert pushes the map over capacity, exactly one entry (the
    /// least recently used) is evicted and returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<(K, V)> {
        let tick = self.next_tick();
        if let Some((_, last)) = self.entries.insert(key.clone(), (value, tick)) {
            self.order.remove(&last);
        }
        self.order.insert(tick, key);

        if self.entries.len() > self.capacity {
            return self.evict_oldest();
        }
        None
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was resident.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let (value, last) = self.entries.remove(key)?;
        self.order.remove(&last);
        Some(value)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    pub fn evict_oldest(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let (value, _) = self.entries.remove(&key)?;
        Some((key, value))
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without removing it.
    #[cfg(test)]
    pub(crate) fn peek_oldest(&self) -> Option<&K> {
        self.order.first_key_value().map(|(_, key)| key)
    }

    /// Iterates over values from least to most recently used.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.order
            .values()
            .filter_map(move |key| self.entries.get(key).map(|(value, _)| value))
    }

    /// Iterates over keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.order.values()
    }

    #[cfg(test)]
    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
