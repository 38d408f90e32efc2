//! Product record DTO
//!
//! The immutable catalog entry stored by the record store and every cache.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single catalog product.
///
/// `recommended_age_group` is one of `"L-H"`, `"L+"` or `"N"`; see
/// [`AgeRange`](crate::models::AgeRange).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    /// Unique primary key
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: String,
    pub category: String,
    /// Price in minor currency units, must be positive
    pub price: i64,
    pub recommended_age_group: String,
    /// Free-form attributes, empty when none are given
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

impl ProductRecord {
    /// Returns true if the record carries a usable primary key.
    pub fn has_id(&self) -> bool {
        !self.id.trim().is_empty()
    }

    /// Validates the record data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let required = [
            ("id", &self.id),
            ("name", &self.name),
            ("type", &self.product_type),
            ("category", &self.category),
            ("recommendedAgeGroup", &self.recommended_age_group),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Some(format!("{} is required", field));
            }
        }
        if self.price <= 0 {
            return Some("price must be greater than zero".to_string());
        }
        None
    }

    /// Returns a copy of this record under a different id.
    pub fn with_id(&self, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..self.clone()
        }
    }
}

/// Compares type or category labels ignoring surrounding whitespace and case.
pub fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
