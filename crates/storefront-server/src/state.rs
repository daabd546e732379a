//! Application State

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use storefront_core::ProductCatalog;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Read-only product catalog served to the frontend
    pub catalog: Arc<ProductCatalog>,
}

impl AppState {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }

    /// Load the catalog from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = ProductCatalog::from_json(&json)
            .with_context(|| format!("parsing catalog {}", path.display()))?;
        Ok(Self::new(catalog))
    }
}
