//! Record Store Module
//!
//! The persistence collaborator consumed by the catalog and recommendation
//! services. Caches never talk to the store directly.

mod memory;

pub use memory::{sample_products, InMemoryRecordStore};

use crate::error::Result;
use crate::models::ProductRecord;

// == Record Store ==
/// Point, type, category and full-scan access to product records.
pub trait RecordStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<ProductRecord>>;

    /// Records whose type matches, ignoring case and surrounding whitespace.
    fn find_by_type(&self, product_type: &str) -> Result<Vec<ProductRecord>>;

    /// Records whose category matches, ignoring case and surrounding whitespace.
    fn find_by_category(&self, category: &str) -> Result<Vec<ProductRecord>>;

    fn find_all(&self) -> Result<Vec<ProductRecord>>;

    /// Inserts or replaces a record, returning what was stored.
    fn save(&self, record: ProductRecord) -> Result<ProductRecord>;

    /// Deletes a record. Deleting an unknown id is not an error.
    fn delete_by_id(&self, id: &str) -> Result<()>;
}
