//! # storefront-core
//!
//! Product model and checkout-link resolution for storefront.
//!
//! ## Checkout Link Strategies
//!
//! ### 1. Static links (default)
//!
//! The hosted checkout URL is built locally from the product id:
//!
//! ```text
//! https://{checkout_host}/buy/{product_id}?quantity=1&redirect_url={base_url}
//! ```
//!
//! No network call, nothing to wait for.
//!
//! ### 2. Dynamic links
//!
//! The backend mints a single-use payment link:
//!
//! ```text
//! GET {base_url}/api/checkout/{onetime|subscription}?productId={id}
//! → { "payment_link": "https://..." }
//! ```
//!
//! While the request is pending the resolver is in flight and further
//! triggers are ignored. Failures put it back into a retryable state.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_core::{CheckoutConfig, CheckoutResolver, HttpPaymentLinkSource, LinkStrategy};
//!
//! let config = CheckoutConfig::new("https://shop.example.com")?
//!     .with_link_strategy(LinkStrategy::Dynamic);
//! let source = HttpPaymentLinkSource::from_config(&config);
//! let resolver = CheckoutResolver::new(config, source, navigator);
//!
//! resolver.resolve(product.product_id.get(), product.is_recurring).await?;
//! ```

mod card;
mod checkout;
mod config;
mod error;
mod http;
mod product;

pub use card::{CardTheme, PROCESSING_LABEL, ProductCardView, button_label, price_amount, price_label};
pub use checkout::{
    CheckoutPhase, CheckoutResolver, CheckoutUrl, Navigator, PaymentLinkSource, PurchaseKind,
    Resolution, static_checkout_url,
};
pub use config::{CheckoutConfig, DEFAULT_CHECKOUT_HOST, LinkStrategy};
pub use error::{CheckoutError, Result};
pub use http::{HttpPaymentLinkSource, PaymentLinkResponse};
pub use product::{Product, ProductCatalog, ProductId, Tier};
