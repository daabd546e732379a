//! Backend Payment Links over HTTP
//!
//! `GET {base_url}/api/checkout/{onetime|subscription}?productId={id}`,
//! answered with `{ "payment_link": "..." }`. Links are single-use, so every
//! request bypasses caches.

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::{Deserialize, Serialize};

use crate::checkout::{CheckoutUrl, PaymentLinkSource, PurchaseKind};
use crate::config::CheckoutConfig;
use crate::error::{CheckoutError, Result};
use crate::product::ProductId;

/// Body returned by the backend checkout endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaymentLinkResponse {
    pub payment_link: String,
}

/// Payment-link source backed by the application's checkout endpoint
#[derive(Clone, Debug)]
pub struct HttpPaymentLinkSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPaymentLinkSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn from_config(config: &CheckoutConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Use a preconfigured client (timeouts, proxies)
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Endpoint for a purchase kind
    pub fn endpoint(&self, kind: PurchaseKind) -> String {
        format!("{}/api/checkout/{}", self.base_url, kind.as_str())
    }

    fn no_cache_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl PaymentLinkSource for HttpPaymentLinkSource {
    async fn payment_link(&self, kind: PurchaseKind, product_id: ProductId) -> Result<CheckoutUrl> {
        let response = self
            .client
            .get(self.endpoint(kind))
            .query(&[("productId", product_id.get())])
            .headers(Self::no_cache_headers())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckoutError::Network(format!(
                "checkout endpoint returned {status}"
            )));
        }

        let body = response.text().await?;
        let data: PaymentLinkResponse = serde_json::from_str(&body)
            .map_err(|e| CheckoutError::MalformedResponse(e.to_string()))?;

        if data.payment_link.trim().is_empty() {
            return Err(CheckoutError::MalformedResponse("empty payment_link".into()));
        }

        Ok(CheckoutUrl::new(data.payment_link))
    }
}
