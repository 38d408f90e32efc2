//! Catalog Service
//!
//! CRUD over the record store with write-through to the point-lookup cache.

use std::sync::Arc;

use tracing::{debug, info};

use crate::cache::ProductCache;
use crate::error::{CatalogError, Result};
use crate::models::ProductRecord;
use crate::store::RecordStore;

// == Catalog Service ==
/// Product CRUD backed by a record store and fronted by a [`ProductCache`].
///
/// Writes never touch the recommendation cache, so recommendation results
/// can lag catalog writes until they are evicted.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn RecordStore>,
    cache: Arc<dyn ProductCache>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn RecordStore>, cache: Arc<dyn ProductCache>) -> Self {
        Self { store, cache }
    }

    // == Create ==
    /// Validates and stores a record, overwriting its cache entry.
    pub fn create(&self, record: ProductRecord) -> Result<ProductRecord> {
        if let Some(message) = record.validate() {
            return Err(CatalogError::InvalidRequest(message));
        }

        let saved = self.store.save(record)?;
        self.cache.put(&saved);
        info!("Stored product {}", saved.id);
        Ok(saved)
    }

    // == Get By Id ==
    /// Cache first; on a miss the store is consulted and the cache backfilled.
    pub fn get_by_id(&self, id: &str) -> Result<Option<ProductRecord>> {
        if let Some(cached) = self.cache.get_by_id(id) {
            debug!("Cache hit for product {}", id);
            return Ok(Some(cached));
        }

        debug!("Cache miss for product {}", id);
        let found = self.store.find_by_id(id)?;
        if let Some(record) = &found {
            self.cache.put(record);
        }
        Ok(found)
    }

    // == Get By Type ==
    /// Returns the cached records for a type if any are resident, otherwise
    /// loads the type from the store and backfills every record.
    pub fn get_by_type(&self, product_type: &str) -> Result<Vec<ProductRecord>> {
        let cached = self.cache.get_by_type(product_type);
        if !cached.is_empty() {
            debug!("Cache served {} products of type {}", cached.len(), product_type);
            return Ok(cached);
        }

        let records = self.store.find_by_type(product_type)?;
        for record in &records {
            self.cache.put(record);
        }
        Ok(records)
    }

    /// Always reads from the store.
    pub fn get_all(&self) -> Result<Vec<ProductRecord>> {
        self.store.find_all()
    }

    // == Update ==
    /// Replaces an existing product; the path id wins over the body id.
    pub fn update(&self, id: &str, record: ProductRecord) -> Result<ProductRecord> {
        if self.get_by_id(id)?.is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }
        self.create(record.with_id(id))
    }

    // == Delete ==
    pub fn delete(&self, id: &str) -> Result<()> {
        if self.get_by_id(id)?.is_none() {
            return Err(CatalogError::NotFound(id.to_string()));
        }

        self.store.delete_by_id(id)?;
        self.cache.remove(id);
        info!("Deleted product {}", id);
        Ok(())
    }
}
