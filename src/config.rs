//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{DEFAULT_CAPACITY, DEFAULT_RECOMMENDATION_CAPACITY};

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Point-lookup cache strategy name (`KEY_BASED` or `TYPE_BASED`)
    pub cache_strategy: String,
    /// Total capacity of the point-lookup cache
    pub cache_capacity: usize,
    /// Capacity of the recommendation result cache
    pub recommendation_cache_capacity: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Whether to load the sample catalog at startup
    pub seed_sample_data: bool,
    /// Whether unparseable age ranges match every age
    pub permissive_age_match: bool,
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Reads a capacity, clamping zero and negative values up to 1.
fn env_capacity(name: &str, default: usize) -> usize {
    let fallback = i64::try_from(default).unwrap_or(i64::MAX);
    usize::try_from(env_or(name, fallback).max(1)).unwrap_or(default)
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_STRATEGY` - Cache strategy (default: KEY_BASED)
    /// - `CACHE_CAPACITY` - Point-lookup cache capacity (default: 1000, minimum: 1)
    /// - `RECOMMENDATION_CACHE_CAPACITY` - Recommendation cache capacity (default: 200, minimum: 1)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SEED_SAMPLE_DATA` - Load sample products (default: true)
    /// - `PERMISSIVE_AGE_MATCH` - Treat malformed age ranges as matching (default: true)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_strategy: env::var("CACHE_STRATEGY").unwrap_or(defaults.cache_strategy),
            cache_capacity: env_capacity("CACHE_CAPACITY", defaults.cache_capacity),
            recommendation_cache_capacity: env_capacity(
                "RECOMMENDATION_CACHE_CAPACITY",
                defaults.recommendation_cache_capacity,
            ),
            server_port: env_or("SERVER_PORT", defaults.server_port),
            seed_sample_data: env_or("SEED_SAMPLE_DATA", defaults.seed_sample_data),
            permissive_age_match: env_or("PERMISSIVE_AGE_MATCH", defaults.permissive_age_match),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_strategy: "KEY_BASED".to_string(),
            cache_capacity: DEFAULT_CAPACITY,
            recommendation_cache_capacity: DEFAULT_RECOMMENDATION_CAPACITY,
            server_port: 8080,
            seed_sample_data: true,
            permissive_age_match: true,
        }
    }
}
