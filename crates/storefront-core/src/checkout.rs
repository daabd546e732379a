//! Checkout Link Resolution
//!
//! Turns a buy-button press into a navigation to the hosted checkout page,
//! either by building the provider URL locally (static links) or by asking
//! the backend for a single-use payment link (dynamic links).
//!
//! ```text
//! ┌──────────┐  dynamic  ┌──────────────────────┐   payment_link   ┌────────────┐
//! │  Button  │──────────▶│ GET /api/checkout/.. │─────────────────▶│            │
//! │  press   │           └──────────────────────┘                  │  Navigator │
//! │          │  static   buy/{id}?quantity=1&redirect_url=..       │            │
//! └──────────┘──────────────────────────────────────────────────▶ └────────────┘
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::config::{CheckoutConfig, LinkStrategy};
use crate::error::{CheckoutError, Result};
use crate::product::{ProductCatalog, ProductId};

/// Checkout mode requested from the backend
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PurchaseKind {
    #[serde(rename = "onetime")]
    OneTime,
    #[serde(rename = "subscription")]
    Subscription,
}

impl PurchaseKind {
    pub const fn from_recurring(is_recurring: bool) -> Self {
        if is_recurring {
            Self::Subscription
        } else {
            Self::OneTime
        }
    }

    /// Path segment used by the backend checkout endpoint
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneTime => "onetime",
            Self::Subscription => "subscription",
        }
    }
}

/// Resolved checkout URL, opaque and good for a single navigation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckoutUrl(String);

impl CheckoutUrl {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for CheckoutUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hosted checkout URL for a single unit of a product
pub fn static_checkout_url(config: &CheckoutConfig, product_id: ProductId) -> CheckoutUrl {
    CheckoutUrl(format!(
        "https://{}/buy/{}?quantity=1&redirect_url={}",
        config.checkout_host, product_id, config.base_url
    ))
}

/// Source of dynamic payment links (Strategy pattern)
///
/// The HTTP implementation lives in [`crate::http`]; tests substitute their own.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait PaymentLinkSource {
    /// Fetch a fresh, single-use payment link
    async fn payment_link(&self, kind: PurchaseKind, product_id: ProductId) -> Result<CheckoutUrl>;
}

/// Moves the user to a resolved checkout URL
pub trait Navigator {
    fn navigate(&self, url: &CheckoutUrl) -> Result<()>;
}

/// Lifecycle of the dynamic-link request
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CheckoutPhase {
    #[default]
    Idle,

    /// Awaiting the backend; the trigger must stay disabled
    Processing,

    /// Last attempt failed; retry is allowed
    Failed { message: String },
}

impl CheckoutPhase {
    pub const fn is_in_flight(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

/// Outcome of a resolution attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The navigator was sent to this URL
    Navigated(CheckoutUrl),

    /// A dynamic request was already pending; nothing was issued
    AlreadyInFlight,
}

type PhaseListener = Box<dyn Fn(&CheckoutPhase) + Send + Sync>;

/// Resolves and follows checkout links for one purchase trigger
pub struct CheckoutResolver<S, N> {
    config: CheckoutConfig,
    source: S,
    navigator: N,
    catalog: Option<Arc<ProductCatalog>>,
    phase: RwLock<CheckoutPhase>,
    listener: Option<PhaseListener>,
}

impl<S, N> CheckoutResolver<S, N>
where
    S: PaymentLinkSource,
    N: Navigator,
{
    pub fn new(config: CheckoutConfig, source: S, navigator: N) -> Self {
        Self {
            config,
            source,
            navigator,
            catalog: None,
            phase: RwLock::new(CheckoutPhase::Idle),
            listener: None,
        }
    }

    /// Reject unknown product ids before any request or navigation
    #[must_use]
    pub fn with_catalog(mut self, catalog: impl Into<Arc<ProductCatalog>>) -> Self {
        self.catalog = Some(catalog.into());
        self
    }

    /// Called on every phase change (drives the button state in the UI)
    #[must_use]
    pub fn with_listener(mut self, listener: impl Fn(&CheckoutPhase) + Send + Sync + 'static) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    pub const fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.phase().is_in_flight()
    }

    /// Resolve with the configured link strategy
    pub async fn resolve(&self, product_id: u64, is_recurring: bool) -> Result<Resolution> {
        self.resolve_with(product_id, is_recurring, self.config.link_strategy)
            .await
    }

    /// Resolve with an explicit link strategy
    pub async fn resolve_with(
        &self,
        product_id: u64,
        is_recurring: bool,
        strategy: LinkStrategy,
    ) -> Result<Resolution> {
        match strategy {
            LinkStrategy::Static => self.resolve_static(product_id),
            LinkStrategy::Dynamic => self.resolve_dynamic(product_id, is_recurring).await,
        }
    }

    fn resolve_static(&self, product_id: u64) -> Result<Resolution> {
        if self.is_in_flight() {
            return Ok(Resolution::AlreadyInFlight);
        }

        let id = self.validate(product_id)?;
        let url = static_checkout_url(&self.config, id);
        tracing::debug!(product_id = %id, url = %url, "navigating to static checkout link");

        self.navigator.navigate(&url).inspect_err(|e| {
            tracing::warn!(product_id = %id, "static checkout navigation failed: {}", e);
        })?;
        Ok(Resolution::Navigated(url))
    }

    async fn resolve_dynamic(&self, product_id: u64, is_recurring: bool) -> Result<Resolution> {
        // Rejected ids never enter Processing
        let id = self.validate(product_id)?;

        if !self.begin() {
            tracing::debug!(product_id, "checkout already in flight, ignoring trigger");
            return Ok(Resolution::AlreadyInFlight);
        }

        match self.fetch_and_navigate(id, is_recurring).await {
            Ok(url) => Ok(Resolution::Navigated(url)),
            Err(e) => {
                tracing::warn!(product_id, "dynamic checkout failed: {}", e);
                self.set_phase(CheckoutPhase::Failed {
                    message: e.user_message().into(),
                });
                Err(e)
            }
        }
    }

    async fn fetch_and_navigate(&self, id: ProductId, is_recurring: bool) -> Result<CheckoutUrl> {
        let kind = PurchaseKind::from_recurring(is_recurring);
        tracing::debug!(product_id = %id, kind = kind.as_str(), "requesting payment link");

        let url = self.source.payment_link(kind, id).await?;
        self.navigator.navigate(&url)?;
        Ok(url)
    }

    fn validate(&self, product_id: u64) -> Result<ProductId> {
        let id = ProductId::new(product_id)?;
        match &self.catalog {
            Some(catalog) if !catalog.contains(id) => Err(CheckoutError::InvalidProduct(product_id)),
            _ => Ok(id),
        }
    }

    /// Enter `Processing` unless already there; the check and the set happen under one lock
    fn begin(&self) -> bool {
        {
            let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
            if phase.is_in_flight() {
                return false;
            }
            *phase = CheckoutPhase::Processing;
        }
        self.notify(&CheckoutPhase::Processing);
        true
    }

    fn set_phase(&self, next: CheckoutPhase) {
        {
            let mut phase = self.phase.write().unwrap_or_else(PoisonError::into_inner);
            phase.clone_from(&next);
        }
        self.notify(&next);
    }

    fn notify(&self, phase: &CheckoutPhase) {
        if let Some(listener) = &self.listener {
            listener(phase);
        }
    }
}

impl<S, N> std::fmt::Debug for CheckoutResolver<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutResolver")
            .field("config", &self.config)
            .field("phase", &self.phase)
            .field("catalog", &self.catalog.as_ref().map(|c| c.len()))
            .finish_non_exhaustive()
    }
}
