//! Product Model
//!
//! Products are supplied externally (catalog JSON) and never mutated here.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CheckoutError, Result};

/// Product identifier, always positive and used verbatim in checkout URLs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ProductId(u64);

impl ProductId {
    /// Create a product id, rejecting zero
    pub fn new(id: u64) -> Result<Self> {
        if id == 0 {
            return Err(CheckoutError::InvalidProduct(id));
        }
        Ok(Self(id))
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for ProductId {
    type Error = CheckoutError;

    fn try_from(id: u64) -> Result<Self> {
        Self::new(id)
    }
}

impl From<ProductId> for u64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Product tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Basic,
    Standard,
    Premium,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Standard => "standard",
            Self::Premium => "premium",
        }
    }

    /// Parse a tier name; anything else is no tier
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "basic" => Some(Self::Basic),
            "standard" => Some(Self::Standard),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }
}

/// Unrecognised tier strings fall back to no tier ("Buy Now")
fn lenient_tier<'de, D>(deserializer: D) -> std::result::Result<Option<Tier>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Tier::parse))
}

/// A purchasable product
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,

    pub name: String,

    pub description: String,

    /// Price in minor currency units (cents)
    pub price: u64,

    /// Subscription when true, one-time purchase otherwise
    pub is_recurring: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<Vec<String>>,

    #[serde(default, deserialize_with = "lenient_tier", skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,

    /// Pre-discount price in minor units, shown struck through on premium cards
    #[serde(default, rename = "originalPrice", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,

    #[serde(default, rename = "socialProof", skip_serializing_if = "Option::is_none")]
    pub social_proof: Option<String>,

    #[serde(default, rename = "additionalFeatures", skip_serializing_if = "Option::is_none")]
    pub additional_features: Option<Vec<String>>,
}

impl Product {
    pub fn is_premium(&self) -> bool {
        self.tier == Some(Tier::Premium)
    }
}

/// Read-only, in-memory product catalog
#[derive(Clone, Debug, Default)]
pub struct ProductCatalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl ProductCatalog {
    /// Build a catalog, rejecting duplicate ids
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.product_id, position).is_some() {
                return Err(CheckoutError::Catalog(format!(
                    "duplicate product id {}",
                    product.product_id
                )));
            }
        }
        Ok(Self { products, index })
    }

    /// Parse a JSON array of products
    pub fn from_json(json: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CheckoutError::Catalog(e.to_string()))?;
        Self::new(products)
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).and_then(|&i| self.products.get(i))
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"[
        {
            "product_id": 42,
            "name": "Starter",
            "description": "One-time unlock",
            "price": 2999,
            "is_recurring": false,
            "tier": "basic",
            "features": ["Core tools"]
        },
        {
            "product_id": 7,
            "name": "Everything",
            "description": "Monthly plan",
            "price": 4900,
            "is_recurring": true,
            "tier": "premium",
            "originalPrice": 9900,
            "socialProof": "Loved by 2,000 teams",
            "additionalFeatures": ["Priority support"]
        }
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = ProductCatalog::from_json(CATALOG).unwrap();
        assert_eq!(catalog.len(), 2);

        let premium = catalog.get(ProductId::new(7).unwrap()).unwrap();
        assert!(premium.is_premium());
        assert_eq!(premium.original_price, Some(9900));
        assert_eq!(premium.social_proof.as_deref(), Some("Loved by 2,000 teams"));
        assert!(catalog.contains(ProductId::new(42).unwrap()));
        assert!(!catalog.contains(ProductId::new(3).unwrap()));
    }

    #[test]
    fn test_zero_id_rejected() {
        assert!(matches!(ProductId::new(0), Err(CheckoutError::InvalidProduct(0))));

        let json = r#"[{"product_id": 0, "name": "x", "description": "", "price": 1, "is_recurring": false}]"#;
        assert!(ProductCatalog::from_json(json).is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        let json = r#"[{"product_id": 1, "name": "x", "description": "", "price": -5, "is_recurring": false}]"#;
        assert!(matches!(ProductCatalog::from_json(json), Err(CheckoutError::Catalog(_))));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"[
            {"product_id": 1, "name": "a", "description": "", "price": 1, "is_recurring": false},
            {"product_id": 1, "name": "b", "description": "", "price": 2, "is_recurring": true}
        ]"#;
        let err = ProductCatalog::from_json(json).unwrap_err();
        assert_eq!(err.to_string(), "Catalog error: duplicate product id 1");
    }

    #[test]
    fn test_unknown_tier_is_untiered() {
        let json = r#"[
            {"product_id": 1, "name": "a", "description": "", "price": 1, "is_recurring": false, "tier": "enterprise"},
            {"product_id": 2, "name": "b", "description": "", "price": 2, "is_recurring": true, "tier": "premium"},
            {"product_id": 3, "name": "c", "description": "", "price": 3, "is_recurring": false, "tier": null}
        ]"#;
        let catalog = ProductCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 3);

        let unknown = catalog.get(ProductId::new(1).unwrap()).unwrap();
        assert_eq!(unknown.tier, None);
        assert_eq!(crate::card::button_label(unknown.tier, false), "Buy Now");

        let premium = catalog.get(ProductId::new(2).unwrap()).unwrap();
        assert_eq!(premium.tier, Some(Tier::Premium));
        assert_eq!(catalog.get(ProductId::new(3).unwrap()).unwrap().tier, None);
    }

    #[test]
    fn test_tier_parse() {
        assert_eq!(Tier::parse("Standard"), Some(Tier::Standard));
        assert_eq!(Tier::parse("gold"), None);
    }
}
