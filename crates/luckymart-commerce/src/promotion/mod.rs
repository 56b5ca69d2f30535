//! Time-based promotions.
//!
//! Two recurring processes mutate catalog prices while the shopper browses:
//!
//! - **Flash sale**: a random product, if in stock and the roll succeeds,
//!   loses `rate` of its price.
//! - **Suggestion**: the first in-stock product other than the one the
//!   shopper last picked loses `rate` of its price.
//!
//! The tick logic is pure (catalog plus explicit draws in, notification out);
//! [`PromotionScheduler`] drives it from tokio timers.

mod flash_sale;
mod scheduler;
mod suggestion;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cart::check_fraction;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::Won;

pub use flash_sale::{run_flash_sale, FlashSaleDraw};
pub use scheduler::PromotionScheduler;
pub use suggestion::run_suggestion;

/// Which process produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromotionKind {
    FlashSale,
    Suggestion,
}

/// Notification emitted when a promotion changes a price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Promotion {
    pub kind: PromotionKind,
    pub product_id: ProductId,
    pub product_name: String,
    /// Price after the cut.
    pub new_price: Won,
    /// Text shown to the shopper.
    pub message: String,
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Settings for both promotion processes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromotionConfig {
    /// Start the processes with the session.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub flash_sale: FlashSaleConfig,
    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

fn default_true() -> bool {
    true
}

impl Default for PromotionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            flash_sale: FlashSaleConfig::default(),
            suggestion: SuggestionConfig::default(),
        }
    }
}

impl PromotionConfig {
    pub fn validate(&self) -> Result<(), ShopError> {
        self.flash_sale.validate()?;
        self.suggestion.validate()
    }
}

/// Flash sale process settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlashSaleConfig {
    /// First tick comes after a random delay below this, plus one period.
    pub initial_delay_max_secs: u64,
    pub period_secs: u64,
    /// Chance that a tick cuts a price.
    pub probability: f64,
    /// Fraction taken off the price.
    pub rate: f64,
}

impl Default for FlashSaleConfig {
    fn default() -> Self {
        Self {
            initial_delay_max_secs: 10,
            period_secs: 30,
            probability: 0.3,
            rate: 0.2,
        }
    }
}

impl FlashSaleConfig {
    pub fn initial_delay_max(&self) -> Duration {
        Duration::from_secs(self.initial_delay_max_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    fn validate(&self) -> Result<(), ShopError> {
        if self.period_secs == 0 {
            return Err(ShopError::invalid_config(
                "promotions.flash_sale.period_secs must be positive",
            ));
        }
        check_fraction("promotions.flash_sale.probability", self.probability)?;
        check_fraction("promotions.flash_sale.rate", self.rate)
    }
}

/// Suggestion process settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SuggestionConfig {
    pub initial_delay_max_secs: u64,
    pub period_secs: u64,
    pub rate: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            initial_delay_max_secs: 20,
            period_secs: 60,
            rate: 0.05,
        }
    }
}

impl SuggestionConfig {
    pub fn initial_delay_max(&self) -> Duration {
        Duration::from_secs(self.initial_delay_max_secs)
    }

    pub fn period(&self) -> Duration {
        Duration::from_secs(self.period_secs)
    }

    fn validate(&self) -> Result<(), ShopError> {
        if self.period_secs == 0 {
            return Err(ShopError::invalid_config(
                "promotions.suggestion.period_secs must be positive",
            ));
        }
        check_fraction("promotions.suggestion.rate", self.rate)
    }
}

/// Render a rate as a percentage for messages ("20", "12.5").
fn percent(rate: f64) -> String {
    let value = rate * 100.0;
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.1}", value)
    }
}
