//! Product Catalog - catalog service with pluggable in-process caching
//!
//! Point lookups go through a key-based or type-partitioned LRU cache, and
//! filtered recommendation queries are cached whole under a normalized key.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;

pub use api::AppState;
pub use config::Config;
pub use error::{CatalogError, Result};
