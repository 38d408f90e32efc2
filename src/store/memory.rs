//! In-memory record store
//!
//! Ordered map behind a read-write lock, plus the sample catalog loaded at
//! startup.

use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::info;

use crate::error::Result;
use crate::models::{same_label, ProductRecord};
use crate::store::RecordStore;

// == In-Memory Record Store ==
/// Record store keeping every product in memory, ordered by id.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<BTreeMap<String, ProductRecord>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with `records`.
    pub fn with_records(records: impl IntoIterator<Item = ProductRecord>) -> Self {
        let store = Self::new();
        {
            let mut map = store.records.write();
            for record in records {
                map.insert(record.id.clone(), record);
            }
        }
        store
    }

    // == Seed ==
    /// Inserts the sample catalog, skipping ids that already exist.
    ///
    /// Returns the number of records inserted.
    pub fn seed_sample_data(&self) -> usize {
        let mut map = self.records.write();
        let mut inserted = 0;
        for record in sample_products() {
            if !map.contains_key(&record.id) {
                map.insert(record.id.clone(), record);
                inserted += 1;
            }
        }
        info!("Sample catalog seeded: {} new products", inserted);
        inserted
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn filter(&self, predicate: impl Fn(&ProductRecord) -> bool) -> Vec<ProductRecord> {
        self.records
            .read()
            .values()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn find_by_id(&self, id: &str) -> Result<Option<ProductRecord>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn find_by_type(&self, product_type: &str) -> Result<Vec<ProductRecord>> {
        Ok(self.filter(|r| same_label(&r.product_type, product_type)))
    }

    fn find_by_category(&self, category: &str) -> Result<Vec<ProductRecord>> {
        Ok(self.filter(|r| same_label(&r.category, category)))
    }

    fn find_all(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.records.read().values().cloned().collect())
    }

    fn save(&self, record: ProductRecord) -> Result<ProductRecord> {
        self.records
            .write()
            .insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn delete_by_id(&self, id: &str) -> Result<()> {
        self.records.write().remove(id);
        Ok(())
    }
}

// == Sample Catalog ==
/// The four products loaded when seeding is enabled.
pub fn sample_products() -> Vec<ProductRecord> {
    fn record(
        id: &str,
        name: &str,
        product_type: &str,
        category: &str,
        price: i64,
        age_group: &str,
        attributes: &[(&str, &str)],
    ) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            product_type: product_type.to_string(),
            category: category.to_string(),
            price,
            recommended_age_group: age_group.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        }
    }

    vec![
        record(
            "p1",
            "Lego Starship",
            "Toy",
            "Kids",
            1999,
            "5-10",
            &[("brand", "Lego"), ("pieces", "250")],
        ),
        record(
            "p2",
            "Hot Wheels Jet Car",
            "Toy",
            "Kids",
            799,
            "5-10",
            &[("brand", "Hot Wheels"), ("color", "red")],
        ),
        record(
            "p3",
            "Barbie Dreamhouse",
            "Toy",
            "Kids",
            2999,
            "6-12",
            &[("brand", "Barbie"), ("floors", "3")],
        ),
        record(
            "p4",
            "Chess Board Classic",
            "Game",
            "Adults",
            1499,
            "10+",
            &[("material", "wood"), ("pieces", "32")],
        ),
    ]
}
