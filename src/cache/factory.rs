//! Cache Factory Module
//!
//! Binds configured capacities to concrete cache strategies at startup.

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::cache::{
    CompositeKeyRecommendationCache, KeyBasedLruCache, ProductCache, RecommendationCache,
    TypeBasedLruCache,
};

// == Cache Strategy ==
/// Eviction strategy of the point-lookup cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CacheStrategy {
    /// One global LRU keyed by product id
    #[default]
    KeyBased,
    /// One LRU per product type
    TypeBased,
}

impl CacheStrategy {
    /// Resolves a configured strategy name, case-insensitively.
    ///
    /// Missing or unknown names fall back to [`CacheStrategy::KeyBased`].
    pub fn from_name(name: Option<&str>) -> Self {
        let Some(name) = name else {
            return Self::default();
        };
        match name.trim().to_uppercase().as_str() {
            "KEY_BASED" => CacheStrategy::KeyBased,
            "TYPE_BASED" => CacheStrategy::TypeBased,
            other => {
                warn!("Unknown cache strategy '{}', falling back to KEY_BASED", other);
                Self::default()
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStrategy::KeyBased => "KEY_BASED",
            CacheStrategy::TypeBased => "TYPE_BASED",
        }
    }
}

impl fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Cache Factory ==
/// Constructs caches. Performs no I/O and cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheFactory;

impl CacheFactory {
    pub fn new() -> Self {
        Self
    }

    /// Creates the point-lookup cache for a configured strategy name.
    pub fn create(&self, strategy: Option<&str>, capacity: usize) -> Arc<dyn ProductCache> {
        self.create_with(CacheStrategy::from_name(strategy), capacity)
    }

    /// Creates the point-lookup cache for an already resolved strategy.
    pub fn create_with(&self, strategy: CacheStrategy, capacity: usize) -> Arc<dyn ProductCache> {
        let capacity = capacity.max(1);
        info!("Creating {} product cache with capacity {}", strategy, capacity);
        match strategy {
            CacheStrategy::KeyBased => Arc::new(KeyBasedLruCache::new(capacity)),
            CacheStrategy::TypeBased => Arc::new(TypeBasedLruCache::new(capacity)),
        }
    }

    /// Creates the recommendation result cache.
    pub fn create_recommendation_cache(&self, capacity: usize) -> Arc<dyn RecommendationCache> {
        let capacity = capacity.max(1);
        info!("Creating recommendation cache with capacity {}", capacity);
        Arc::new(CompositeKeyRecommendationCache::new(capacity))
    }
}
