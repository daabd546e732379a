//! storefront HTTP Server
//!
//! Axum-based server providing the product catalog API and serving the
//! compiled WASM frontend. Checkout links are minted by a separate backend
//! at `/api/checkout/{onetime|subscription}`.

mod handlers;
mod state;

use std::path::Path;

use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::handlers::api_routes;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// Load `.env` (or an explicit file); variables already set win
fn load_environment(path: Option<&Path>) {
    let loaded = match path {
        Some(path) => dotenvy::from_path(path),
        None => dotenvy::dotenv().map(|_| ()),
    };
    loaded.ok();
}

/// Tracing filter from `RUST_LOG`, read after the environment is loaded
fn log_filter() -> String {
    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first: RUST_LOG may live in .env
    load_environment(None);

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load catalog
    let catalog_path = std::env::var("CATALOG_PATH").unwrap_or_else(|_| "products.json".into());
    let state = AppState::load(&catalog_path)?;
    tracing::info!("✓ Loaded {} products from {}", state.catalog.len(), catalog_path);
    for product in state.catalog.products() {
        tracing::info!(
            "  • {} ({}) {}",
            product.name,
            product.product_id,
            product.tier.map_or("untiered", |t| t.as_str())
        );
    }

    // The frontend bakes its checkout settings in at build time; only validate them here
    if let Err(e) = storefront_core::CheckoutConfig::from_env() {
        tracing::warn!("⚠ {} - rebuild the frontend with the same values", e);
    }

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_dir = std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".into());

    // Build router
    let app = api_routes()
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(&static_dir))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 storefront server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  GET  /api/products       - Product catalog");
    tracing::info!("  GET  /api/products/{{id}}  - Single product");
    tracing::info!("  GET  /*                  - Frontend from {}", static_dir);
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
