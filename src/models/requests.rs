//! Request DTOs for the catalog API
//!
//! Product bodies deserialize straight into [`ProductRecord`](super::ProductRecord)
//! and recommendation filters into [`RecommendationQuery`](super::RecommendationQuery);
//! this module holds the remaining query-string shapes.

use serde::Deserialize;

/// Default number of similar products returned
pub const DEFAULT_SIMILAR_LIMIT: usize = 5;

/// Query string of GET /api/recommendations/:product_id
#[derive(Debug, Clone, Deserialize)]
pub struct SimilarProductsParams {
    /// Maximum number of products returned
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_SIMILAR_LIMIT
}

impl Default for SimilarProductsParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_SIMILAR_LIMIT,
        }
    }
}
