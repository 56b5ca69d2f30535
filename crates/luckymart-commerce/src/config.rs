//! Storefront configuration.

use serde::{Deserialize, Serialize};

use crate::cart::PricingRules;
use crate::catalog::{seed_products, Catalog, Product, DEFAULT_LOW_STOCK_THRESHOLD};
use crate::error::ShopError;
use crate::promotion::PromotionConfig;

/// Everything a session needs to start.
///
/// Every field has a default, so an empty document yields the stock
/// storefront: five seeded products, Tuesday discount, both promotions on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Products below this many units show up in stock alerts.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
    /// Fixed seed for promotion randomness. Entropy when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    /// Initial catalog, in display order.
    #[serde(default = "seed_products")]
    pub catalog: Vec<Product>,
    #[serde(default)]
    pub pricing: PricingRules,
    #[serde(default)]
    pub promotions: PromotionConfig,
}

fn default_low_stock_threshold() -> u32 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            low_stock_threshold: default_low_stock_threshold(),
            rng_seed: None,
            catalog: seed_products(),
            pricing: PricingRules::default(),
            promotions: PromotionConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Check the configuration without starting anything.
    pub fn validate(&self) -> Result<(), ShopError> {
        if let Some(product) = self.catalog.iter().find(|p| p.id().as_str().is_empty()) {
            return Err(ShopError::invalid_config(format!(
                "product '{}' has an empty id",
                product.name()
            )));
        }
        Catalog::new(self.catalog.clone())?;
        self.pricing.validate()?;
        self.promotions.validate()
    }

    /// Build the initial catalog.
    pub fn build_catalog(&self) -> Result<Catalog, ShopError> {
        Catalog::new(self.catalog.clone())
    }
}
