//! Product Card Presentation
//!
//! Pure view model for a product card: theme, badges, price labels and the
//! checkout button copy. Rendering lives in the web crate.

use rust_decimal::Decimal;

use crate::product::{Product, Tier};

/// Button copy while a checkout request is awaiting the backend
pub const PROCESSING_LABEL: &str = "Processing...";

/// Checkout button label for a tier and in-flight flag
pub const fn button_label(tier: Option<Tier>, in_flight: bool) -> &'static str {
    if in_flight {
        return PROCESSING_LABEL;
    }
    match tier {
        Some(Tier::Basic) => "Start Simple",
        Some(Tier::Standard) => "Go Pro",
        Some(Tier::Premium) => "Unlock Everything",
        None => "Buy Now",
    }
}

/// Format minor units as a dollar label, dropping trailing zeros (`2999` → `$29.99`, `3000` → `$30`)
pub fn price_label(minor_units: u64) -> String {
    format!("${}", price_amount(minor_units))
}

/// Major-unit amount for a minor-unit price
pub fn price_amount(minor_units: u64) -> Decimal {
    (Decimal::from(minor_units) / Decimal::ONE_HUNDRED).normalize()
}

/// Visual treatment of a card
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardTheme {
    Standard,
    Premium,
}

impl CardTheme {
    pub const fn card_class(self) -> &'static str {
        match self {
            Self::Standard => "product-card",
            Self::Premium => "product-card product-card-premium",
        }
    }

    pub const fn button_class(self) -> &'static str {
        match self {
            Self::Standard => "checkout-btn",
            Self::Premium => "checkout-btn checkout-btn-premium",
        }
    }
}

/// Everything a card needs to render, derived from a product
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductCardView {
    pub name: String,
    pub tier: Option<Tier>,
    pub theme: CardTheme,
    pub price: String,

    /// Struck-through pre-discount price (premium only)
    pub original_price: Option<String>,
    pub features: Vec<String>,

    /// Premium only
    pub social_proof: Option<String>,

    /// Premium only
    pub additional_features: Vec<String>,
}

impl ProductCardView {
    pub const BEST_VALUE_BADGE: &'static str = "Best Value";
    pub const LIMITED_OFFER_BADGE: &'static str = "Limited Time Offer!";

    pub fn is_premium(&self) -> bool {
        self.theme == CardTheme::Premium
    }

    pub fn badges(&self) -> Option<(&'static str, &'static str)> {
        self.is_premium()
            .then_some((Self::BEST_VALUE_BADGE, Self::LIMITED_OFFER_BADGE))
    }

    pub const fn button_label(&self, in_flight: bool) -> &'static str {
        button_label(self.tier, in_flight)
    }
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        let premium = product.is_premium();
        Self {
            name: product.name.clone(),
            tier: product.tier,
            theme: if premium { CardTheme::Premium } else { CardTheme::Standard },
            price: price_label(product.price),
            original_price: product
                .original_price
                .filter(|_| premium)
                .map(price_label),
            features: product.features.clone().unwrap_or_default(),
            social_proof: product.social_proof.clone().filter(|_| premium),
            additional_features: if premium {
                product.additional_features.clone().unwrap_or_default()
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::ProductId;
    use rust_decimal_macros::dec;

    fn product(tier: Option<Tier>) -> Product {
        Product {
            product_id: ProductId::new(1).unwrap(),
            name: "Plan".into(),
            description: "A plan".into(),
            price: 4900,
            is_recurring: false,
            features: Some(vec!["Fast".into()]),
            tier,
            original_price: Some(9900),
            social_proof: Some("Trusted by many".into()),
            additional_features: Some(vec!["Extra".into()]),
        }
    }

    #[test]
    fn test_button_label_by_tier() {
        assert_eq!(button_label(Some(Tier::Basic), false), "Start Simple");
        assert_eq!(button_label(Some(Tier::Standard), false), "Go Pro");
        assert_eq!(button_label(Some(Tier::Premium), false), "Unlock Everything");
        assert_eq!(button_label(None, false), "Buy Now");
    }

    #[test]
    fn test_processing_overrides_tier() {
        for tier in [None, Some(Tier::Basic), Some(Tier::Standard), Some(Tier::Premium)] {
            assert_eq!(button_label(tier, true), PROCESSING_LABEL);
        }
    }

    #[test]
    fn test_price_label() {
        assert_eq!(price_label(2999), "$29.99");
        assert_eq!(price_label(3000), "$30");
        assert_eq!(price_label(1050), "$10.5");
        assert_eq!(price_label(0), "$0");
        assert_eq!(price_amount(12345), dec!(123.45));
    }

    #[test]
    fn test_premium_card() {
        let view = ProductCardView::from(&product(Some(Tier::Premium)));
        assert_eq!(view.theme, CardTheme::Premium);
        assert_eq!(view.original_price.as_deref(), Some("$99"));
        assert_eq!(view.social_proof.as_deref(), Some("Trusted by many"));
        assert_eq!(view.additional_features, vec!["Extra".to_string()]);
        assert_eq!(view.badges(), Some(("Best Value", "Limited Time Offer!")));
        assert_eq!(view.button_label(false), "Unlock Everything");
    }

    #[test]
    fn test_standard_card_hides_premium_extras() {
        let view = ProductCardView::from(&product(Some(Tier::Standard)));
        assert_eq!(view.theme, CardTheme::Standard);
        assert_eq!(view.price, "$49");
        assert!(view.original_price.is_none());
        assert!(view.social_proof.is_none());
        assert!(view.additional_features.is_empty());
        assert!(view.badges().is_none());
        assert_eq!(view.features, vec!["Fast".to_string()]);
    }
}
