//! HTTP Handlers

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Serialize;

use storefront_core::{Product, ProductId};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub products: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn product_not_found(id: u64) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Product {id} not found"),
            code: "PRODUCT_NOT_FOUND".into(),
        }),
    )
}

fn invalid_product_id(raw: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: format!("Invalid product id '{raw}'"),
            code: "INVALID_PRODUCT_ID".into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// API routes (static assets are mounted by the caller)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        products: state.catalog.len(),
    })
}

/// Full product catalog
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products().to_vec())
}

/// Single product by id
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id: u64 = raw.parse().map_err(|_| invalid_product_id(&raw))?;
    let product_id = ProductId::new(id).map_err(|_| product_not_found(id))?;

    state
        .catalog
        .get(product_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| {
            tracing::debug!(product_id = id, "product lookup missed");
            product_not_found(id)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use storefront_core::ProductCatalog;
    use tower::ServiceExt;

    const CATALOG: &str = r#"[
        {"product_id": 42, "name": "Starter", "description": "One-time", "price": 2999, "is_recurring": false, "tier": "basic"},
        {"product_id": 7, "name": "Everything", "description": "Monthly", "price": 4900, "is_recurring": true, "tier": "premium", "originalPrice": 9900}
    ]"#;

    fn app() -> Router {
        let state = AppState::new(ProductCatalog::from_json(CATALOG).unwrap());
        api_routes().with_state(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = app()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["products"], 2);
    }

    #[tokio::test]
    async fn test_list_products() {
        let (status, body) = get_json("/api/products").await;
        assert_eq!(status, StatusCode::OK);

        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0]["product_id"], 42);
        assert_eq!(products[1]["originalPrice"], 9900);
        assert!(products[0].get("originalPrice").is_none());
    }

    #[tokio::test]
    async fn test_get_product() {
        let (status, body) = get_json("/api/products/7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Everything");
        assert_eq!(body["tier"], "premium");
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let (status, body) = get_json("/api/products/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRODUCT_NOT_FOUND");

        let (status, _) = get_json("/api/products/0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_numeric_product_id() {
        for uri in ["/api/products/abc", "/api/products/-1"] {
            let (status, body) = get_json(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["code"], "INVALID_PRODUCT_ID");
        }
    }
}
