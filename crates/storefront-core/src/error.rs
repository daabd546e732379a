//! Checkout Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Checkout-related errors
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// Backend unreachable or answered with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered but the body is not `{ "payment_link": "..." }`
    #[error("Malformed checkout response: {0}")]
    MalformedResponse(String),

    /// Product id is zero or not in the catalog
    #[error("Invalid product: {0}")]
    InvalidProduct(u64),

    /// Navigating to the resolved URL failed
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog could not be loaded
    #[error("Catalog error: {0}")]
    Catalog(String),
}

impl CheckoutError {
    /// Check if this error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::MalformedResponse(_) | Self::Navigation(_)
        )
    }

    /// Get user-friendly message
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Network(_) => "Could not reach checkout. Please try again.",
            Self::MalformedResponse(_) => "Checkout is temporarily unavailable. Please try again.",
            Self::InvalidProduct(_) => "This product is no longer available.",
            Self::Navigation(_) => "Could not open the checkout page. Please try again.",
            Self::Config(_) | Self::Catalog(_) => "Service configuration error.",
        }
    }
}

impl From<reqwest::Error> for CheckoutError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}
