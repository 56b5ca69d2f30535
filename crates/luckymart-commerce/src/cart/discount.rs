//! Discount rules.
//!
//! Three discounts stack in a fixed order:
//!
//! 1. **Line discount**: per-product rate, only for lines of at least
//!    `line_discount_min_quantity` units.
//! 2. **Bulk discount**: once the cart holds `bulk_threshold` items, the total
//!    is capped at `subtotal * (1 - bulk_rate)` if that is cheaper.
//! 3. **Day discount**: an extra `day_discount_rate` off on one weekday.

use std::collections::BTreeMap;

use chrono::{Datelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ShopError;
use crate::ids::ProductId;

/// Shown next to the total once the cart is large enough. Cosmetic: it does
/// not reflect the rate actually applied.
pub const BULK_LABEL: &str = "(10.0% 할인 적용)";

/// Pricing parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PricingRules {
    pub line_discount_min_quantity: u32,
    pub bulk_threshold: u32,
    pub bulk_rate: f64,
    pub day_discount_weekday: Weekday,
    pub day_discount_rate: f64,
    /// Item count from which [`BULK_LABEL`] is shown.
    pub label_threshold: u32,
    /// One bonus point per this many won of the final total.
    pub points_unit: u64,
    /// Line discount rate per product. Products not listed get 0%.
    pub line_rates: BTreeMap<ProductId, f64>,
}

impl Default for PricingRules {
    fn default() -> Self {
        let line_rates = [("p1", 0.1), ("p2", 0.15), ("p3", 0.2), ("p4", 0.05), ("p5", 0.25)]
            .into_iter()
            .map(|(id, rate)| (ProductId::new(id), rate))
            .collect();
        Self {
            line_discount_min_quantity: 10,
            bulk_threshold: 30,
            bulk_rate: 0.25,
            day_discount_weekday: Weekday::Tue,
            day_discount_rate: 0.1,
            label_threshold: 10,
            points_unit: 1000,
            line_rates,
        }
    }
}

impl PricingRules {
    /// Line discount rate for `quantity` units of a product.
    pub fn line_rate(&self, product_id: &ProductId, quantity: u32) -> f64 {
        if quantity < self.line_discount_min_quantity {
            return 0.0;
        }
        self.line_rates.get(product_id).copied().unwrap_or(0.0)
    }

    /// Cap the total at the bulk price once enough items are in the cart.
    pub fn apply_bulk_discount(&self, total: f64, subtotal: f64, item_count: u32) -> f64 {
        if item_count >= self.bulk_threshold {
            total.min(subtotal * (1.0 - self.bulk_rate))
        } else {
            total
        }
    }

    pub fn is_discount_day(&self, date: &impl Datelike) -> bool {
        date.weekday() == self.day_discount_weekday
    }

    pub fn apply_day_discount(&self, total: f64, date: &impl Datelike) -> f64 {
        if self.is_discount_day(date) {
            total * (1.0 - self.day_discount_rate)
        } else {
            total
        }
    }

    pub fn discount_label(&self, item_count: u32) -> Option<&'static str> {
        (item_count >= self.label_threshold).then_some(BULK_LABEL)
    }

    pub fn bonus_points(&self, total: f64) -> u64 {
        if total <= 0.0 {
            return 0;
        }
        (total / self.points_unit as f64).floor() as u64
    }

    pub fn validate(&self) -> Result<(), ShopError> {
        for (id, rate) in &self.line_rates {
            check_fraction(&format!("pricing.line_rates.{}", id), *rate)?;
        }
        check_fraction("pricing.bulk_rate", self.bulk_rate)?;
        check_fraction("pricing.day_discount_rate", self.day_discount_rate)?;
        if self.points_unit == 0 {
            return Err(ShopError::invalid_config("pricing.points_unit must be positive"));
        }
        Ok(())
    }
}

pub(crate) fn check_fraction(name: &str, value: f64) -> Result<(), ShopError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ShopError::invalid_config(format!(
            "{} must be within 0..=1, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_line_rate_requires_minimum_quantity() {
        let rules = PricingRules::default();
        assert_eq!(rules.line_rate(&"p1".into(), 9), 0.0);
        assert_eq!(rules.line_rate(&"p1".into(), 10), 0.1);
        assert_eq!(rules.line_rate(&"p5".into(), 12), 0.25);
    }

    #[test]
    fn test_unknown_product_has_no_line_rate() {
        let rules = PricingRules::default();
        assert_eq!(rules.line_rate(&"zz".into(), 50), 0.0);
    }

    #[test]
    fn test_bulk_discount_threshold() {
        let rules = PricingRules::default();
        assert_eq!(rules.apply_bulk_discount(900.0, 1000.0, 29), 900.0);
        assert_eq!(rules.apply_bulk_discount(900.0, 1000.0, 30), 750.0);
        // Never raises the total.
        assert_eq!(rules.apply_bulk_discount(700.0, 1000.0, 30), 700.0);
    }

    #[test]
    fn test_day_discount_only_on_tuesday() {
        let rules = PricingRules::default();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let wednesday = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
        assert!(rules.is_discount_day(&tuesday));
        assert_eq!(rules.apply_day_discount(1000.0, &tuesday), 900.0);
        assert_eq!(rules.apply_day_discount(1000.0, &wednesday), 1000.0);
    }

    #[test]
    fn test_label_and_points() {
        let rules = PricingRules::default();
        assert_eq!(rules.discount_label(9), None);
        assert_eq!(rules.discount_label(10), Some(BULK_LABEL));
        assert_eq!(rules.bonus_points(10999.9), 10);
        assert_eq!(rules.bonus_points(999.0), 0);
    }

    #[test]
    fn test_validate_rejects_bad_rates() {
        let mut rules = PricingRules::default();
        assert!(rules.validate().is_ok());

        rules.bulk_rate = 1.2;
        assert!(rules.validate().is_err());

        let mut rules = PricingRules::default();
        rules.line_rates.insert("p1".into(), -0.1);
        assert!(rules.validate().is_err());
    }
}
