//! Service Module
//!
//! Query-serving layer: probes the caches, falls back to the record store on
//! a miss and populates the caches with what it fetched.

mod catalog;
mod recommendation;

pub use catalog::CatalogService;
pub use recommendation::RecommendationService;
