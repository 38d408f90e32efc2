//! API Routes
//!
//! Configures the Axum router with all catalog endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, create_product_handler, delete_product_handler, get_product_handler,
    health_handler, list_products_handler, products_by_type_handler, recommend_handler,
    similar_products_handler, update_product_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route(
            "/api/products",
            post(create_product_handler).get(list_products_handler),
        )
        .route(
            "/api/products/type/:product_type",
            get(products_by_type_handler),
        )
        .route(
            "/api/products/:id",
            get(get_product_handler)
                .put(update_product_handler)
                .delete(delete_product_handler),
        )
        .route("/api/recommendations", get(recommend_handler))
        .route(
            "/api/recommendations/:product_id",
            get(similar_products_handler),
        )
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        create_router(AppState::from_config(&Config::default()))
    }

    async fn status_of(uri: &str) -> StatusCode {
        create_test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        assert_eq!(status_of("/health").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stats_endpoint() {
        assert_eq!(status_of("/api/cache/stats").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_type_route_does_not_shadow_id_route() {
        assert_eq!(status_of("/api/products/type/Toy").await, StatusCode::OK);
        assert_eq!(status_of("/api/products/p1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        assert_eq!(
            status_of("/api/products/nonexistent").await,
            StatusCode::NOT_FOUND
        );
    }
}
