//! Data models for the catalog service
//!
//! The product record shared by the store and caches, the recommendation
//! query, and the DTOs used for HTTP request/response bodies.

pub mod product;
pub mod query;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use product::{same_label, ProductRecord};
pub use query::{age_matches, AgeRange, RecommendationQuery};
pub use requests::SimilarProductsParams;
pub use responses::{CacheStatsResponse, ErrorResponse, HealthResponse, StatsResponse};

#[cfg(test)]
pub(crate) use product::fixtures;
