//! Error types for the catalog service
//!
//! Provides unified error handling using thiserror. Caches never fail; these
//! errors come from the record store, validation and missing products.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Catalog Error Enum ==
/// Unified error type for the catalog service.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Product not found
    #[error("Product not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The record store failed
    #[error("Record store error: {0}")]
    Store(String),
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        let body = Json(ErrorResponse::new(status.as_u16(), self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the catalog service.
pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: CatalogError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let (status, json) = body_json(CatalogError::NotFound("p1".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "Product not found: p1");
        assert_eq!(json["status"], 404);
        assert!(json["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_error_status_mapping() {
        let cases = [
            (CatalogError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (CatalogError::Store("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, expected) in cases {
            let (status, json) = body_json(error).await;
            assert_eq!(status, expected);
            assert!(json["error"].is_string());
        }
    }
}
