//! Checkout Configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CheckoutError, Result};

/// Default hosted checkout domain (test mode)
pub const DEFAULT_CHECKOUT_HOST: &str = "test.checkout.dodopayments.com";

/// How a checkout URL is obtained
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkStrategy {
    /// Build the provider URL locally
    #[default]
    Static,

    /// Ask the backend for a single-use payment link
    Dynamic,
}

impl LinkStrategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl FromStr for LinkStrategy {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "dynamic" => Ok(Self::Dynamic),
            other => Err(CheckoutError::Config(format!(
                "unknown link strategy '{other}' (expected 'static' or 'dynamic')"
            ))),
        }
    }
}

/// Settings shared by every checkout resolution
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CheckoutConfig {
    /// Application origin; backend calls go here and checkout redirects back here
    pub base_url: String,

    /// Host of the hosted checkout page
    pub checkout_host: String,

    pub link_strategy: LinkStrategy,
}

impl CheckoutConfig {
    /// Create with the default checkout host and static links
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(CheckoutError::Config("base URL is empty".into()));
        }

        Ok(Self {
            base_url,
            checkout_host: DEFAULT_CHECKOUT_HOST.into(),
            link_strategy: LinkStrategy::default(),
        })
    }

    /// Create from environment variables
    ///
    /// `STOREFRONT_BASE_URL` is required; `CHECKOUT_HOST` and
    /// `CHECKOUT_LINK_STRATEGY` fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let base_url = std::env::var("STOREFRONT_BASE_URL")
            .map_err(|_| CheckoutError::Config("STOREFRONT_BASE_URL not set".into()))?;

        Self::from_settings(
            &base_url,
            std::env::var("CHECKOUT_HOST").ok().as_deref(),
            std::env::var("CHECKOUT_LINK_STRATEGY").ok().as_deref(),
        )
    }

    /// Create from raw `STOREFRONT_BASE_URL` / `CHECKOUT_HOST` /
    /// `CHECKOUT_LINK_STRATEGY` values, whether read at runtime or at compile time
    pub fn from_settings(base_url: &str, checkout_host: Option<&str>, link_strategy: Option<&str>) -> Result<Self> {
        let mut config = Self::new(base_url)?;
        if let Some(host) = checkout_host {
            config = config.with_checkout_host(host);
        }
        if let Some(strategy) = link_strategy {
            config = config.with_link_strategy(strategy.parse()?);
        }
        Ok(config)
    }

    #[must_use]
    pub fn with_checkout_host(mut self, host: impl Into<String>) -> Self {
        self.checkout_host = host.into();
        self
    }

    #[must_use]
    pub fn with_link_strategy(mut self, strategy: LinkStrategy) -> Self {
        self.link_strategy = strategy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = CheckoutConfig::new("https://shop.example.com/").unwrap();
        assert_eq!(config.base_url, "https://shop.example.com");
        assert_eq!(config.checkout_host, DEFAULT_CHECKOUT_HOST);
        assert_eq!(config.link_strategy, LinkStrategy::Static);
    }

    #[test]
    fn test_empty_base_url() {
        assert!(matches!(CheckoutConfig::new("  "), Err(CheckoutError::Config(_))));
    }

    #[test]
    fn test_from_settings() {
        let config = CheckoutConfig::from_settings(
            "https://shop.example.com",
            Some("checkout.dodopayments.com"),
            Some("dynamic"),
        )
        .unwrap();
        assert_eq!(config.checkout_host, "checkout.dodopayments.com");
        assert_eq!(config.link_strategy, LinkStrategy::Dynamic);

        let config = CheckoutConfig::from_settings("https://shop.example.com", None, None).unwrap();
        assert_eq!(config.checkout_host, DEFAULT_CHECKOUT_HOST);
        assert_eq!(config.link_strategy, LinkStrategy::Static);

        assert!(CheckoutConfig::from_settings("https://shop.example.com", None, Some("later")).is_err());
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("Dynamic".parse::<LinkStrategy>().unwrap(), LinkStrategy::Dynamic);
        assert_eq!(" static ".parse::<LinkStrategy>().unwrap(), LinkStrategy::Static);
        assert!("sometimes".parse::<LinkStrategy>().is_err());
    }
}
