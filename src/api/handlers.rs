//! API Handlers
//!
//! HTTP request handlers for the catalog, recommendation and cache endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    Json,
};
use tracing::info;

use crate::cache::{CacheFactory, CacheStrategy, ProductCache, RecommendationCache};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::models::{
    HealthResponse, ProductRecord, RecommendationQuery, SimilarProductsParams, StatsResponse,
};
use crate::service::{CatalogService, RecommendationService};
use crate::store::{InMemoryRecordStore, RecordStore};

/// Application state shared across all handlers.
///
/// Caches are built once at startup and shared by reference with the
/// services that need them.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub recommendations: RecommendationService,
    pub product_cache: Arc<dyn ProductCache>,
    pub recommendation_cache: Arc<dyn RecommendationCache>,
    pub strategy: CacheStrategy,
}

impl AppState {
    /// Wires caches and services around an existing record store.
    pub fn with_store(config: &Config, store: Arc<dyn RecordStore>) -> Self {
        let factory = CacheFactory::new();
        let strategy = CacheStrategy::from_name(Some(&config.cache_strategy));
        let product_cache = factory.create_with(strategy, config.cache_capacity);
        let recommendation_cache =
            factory.create_recommendation_cache(config.recommendation_cache_capacity);

        Self {
            catalog: CatalogService::new(store.clone(), product_cache.clone()),
            recommendations: RecommendationService::new(
                store,
                recommendation_cache.clone(),
                product_cache.clone(),
                config.permissive_age_match,
            ),
            product_cache,
            recommendation_cache,
            strategy,
        }
    }

    /// Creates a new AppState from configuration with an in-memory store.
    pub fn from_config(config: &Config) -> Self {
        let store = InMemoryRecordStore::new();
        if config.seed_sample_data {
            store.seed_sample_data();
        }
        Self::with_store(config, Arc::new(store))
    }
}

/// Handler for POST /api/products
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(record): Json<ProductRecord>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<ProductRecord>)> {
    let saved = state.catalog.create(record)?;
    let location = format!("/api/products/{}", saved.id);

    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(saved)))
}

/// Handler for GET /api/products
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductRecord>>> {
    Ok(Json(state.catalog.get_all()?))
}

/// Handler for GET /api/products/:id
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductRecord>> {
    state
        .catalog
        .get_by_id(&id)?
        .map(Json)
        .ok_or(CatalogError::NotFound(id))
}

/// Handler for GET /api/products/type/:product_type
pub async fn products_by_type_handler(
    State(state): State<AppState>,
    Path(product_type): Path<String>,
) -> Result<Json<Vec<ProductRecord>>> {
    Ok(Json(state.catalog.get_by_type(&product_type)?))
}

/// Handler for PUT /api/products/:id
pub async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(record): Json<ProductRecord>,
) -> Result<Json<ProductRecord>> {
    Ok(Json(state.catalog.update(&id, record)?))
}

/// Handler for DELETE /api/products/:id
pub async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    state.catalog.delete(&id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /api/recommendations
///
/// Filters: `minPrice`, `maxPrice`, `type`, `category`, `age`.
pub async fn recommend_handler(
    State(state): State<AppState>,
    Query(query): Query<RecommendationQuery>,
) -> Result<Json<Vec<ProductRecord>>> {
    Ok(Json(state.recommendations.recommend(&query)?))
}

/// Handler for GET /api/recommendations/:product_id
///
/// Responds 404 when there is nothing similar to recommend.
pub async fn similar_products_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Query(params): Query<SimilarProductsParams>,
) -> Result<Json<Vec<ProductRecord>>> {
    let similar = state
        .recommendations
        .recommend_similar(&product_id, params.limit)?;
    if similar.is_empty() {
        info!("No recommendations for product {}", product_id);
        return Err(CatalogError::NotFound(product_id));
    }
    Ok(Json(similar))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        strategy: state.strategy.to_string(),
        product_cache: state.product_cache.stats().into(),
        recommendation_cache: state.recommendation_cache.stats().into(),
    })
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::product;

    fn seeded_state() -> AppState {
        AppState::from_config(&Config::default())
    }

    #[tokio::test]
    async fn test_create_and_get_handler() {
        let state = seeded_state();

        let (status, headers, Json(saved)) =
            create_product_handler(State(state.clone()), Json(product("p9", "Book", 10)))
                .await
                .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(headers[0].1, "/api/products/p9");
        assert_eq!(saved.id, "p9");

        let Json(fetched) = get_product_handler(State(state), Path("p9".to_string()))
            .await
            .unwrap();
        assert_eq!(fetched.product_type, "Book");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let result = get_product_handler(State(seeded_state()), Path("nope".to_string())).await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_invalid_product() {
        let result =
            create_product_handler(State(seeded_state()), Json(product("", "Book", 10))).await;
        assert!(matches!(result, Err(CatalogError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_delete_handler() {
        let state = seeded_state();

        let status = delete_product_handler(State(state.clone()), Path("p1".to_string()))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);

        let result = get_product_handler(State(state), Path("p1".to_string())).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_similar_products_empty_is_not_found() {
        let result = similar_products_handler(
            State(seeded_state()),
            Path("missing".to_string()),
            Query(SimilarProductsParams::default()),
        )
        .await;
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stats_handler_reports_strategy() {
        let config = Config {
            cache_strategy: "type_based".to_string(),
            ..Config::default()
        };
        let state = AppState::from_config(&config);

        let response = cache_stats_handler(State(state)).await;
        assert_eq!(response.strategy, "TYPE_BASED");
        assert_eq!(response.product_cache.hits, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
