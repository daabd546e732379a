//! API Client

use storefront_core::{
    CheckoutConfig, CheckoutError, CheckoutUrl, Navigator, Product, ProductCatalog,
};

/// Build checkout settings from compile-time env, falling back to the page origin
pub fn checkout_config() -> Result<CheckoutConfig, CheckoutError> {
    let base_url = option_env!("STOREFRONT_BASE_URL")
        .map(str::to_string)
        .or_else(|| web_sys::window().and_then(|w| w.location().origin().ok()))
        .unwrap_or_else(|| "http://localhost:3000".into());

    // Same variable names the server reads at runtime
    CheckoutConfig::from_settings(
        &base_url,
        option_env!("CHECKOUT_HOST"),
        option_env!("CHECKOUT_LINK_STRATEGY"),
    )
}

/// Fetch the product catalog from the server
pub async fn fetch_catalog(base_url: &str) -> Result<ProductCatalog, String> {
    let response = reqwest::Client::new()
        .get(format!("{base_url}/api/products"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("Failed to load products ({})", response.status()));
    }

    let products: Vec<Product> = response.json().await.map_err(|e| e.to_string())?;
    ProductCatalog::new(products).map_err(|e| e.to_string())
}

/// Navigates the browser tab to the checkout page
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn navigate(&self, url: &CheckoutUrl) -> storefront_core::Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| CheckoutError::Navigation("no browser window".into()))?;
        window
            .location()
            .set_href(url.as_str())
            .map_err(|e| CheckoutError::Navigation(format!("{e:?}")))
    }
}
