//! API Module
//!
//! HTTP handlers and routing for the catalog REST API.
//!
//! # Endpoints
//! - `POST /api/products` - Create a product
//! - `GET /api/products` - List every product
//! - `GET /api/products/:id` - Fetch a product by id
//! - `GET /api/products/type/:product_type` - Fetch products of a type
//! - `PUT /api/products/:id` - Replace a product
//! - `DELETE /api/products/:id` - Delete a product
//! - `GET /api/recommendations` - Filtered recommendations
//! - `GET /api/recommendations/:product_id` - Similar products
//! - `GET /api/cache/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
