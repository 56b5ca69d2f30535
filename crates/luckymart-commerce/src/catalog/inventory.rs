//! Stock status reporting.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Products with fewer units than this are reported.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Stock condition worth telling the shopper about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StockStatus {
    /// A few units left.
    LowStock { remaining: u32 },
    /// Nothing left.
    SoldOut,
}

/// Stock status line for one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_id: ProductId,
    pub product_name: String,
    #[serde(flatten)]
    pub status: StockStatus,
}

impl StockAlert {
    /// Build an alert if the product is below `threshold`.
    pub fn for_product(product: &Product, threshold: u32) -> Option<Self> {
        if product.stock() >= threshold {
            return None;
        }
        let status = match product.stock() {
            0 => StockStatus::SoldOut,
            remaining => StockStatus::LowStock { remaining },
        };
        Some(Self {
            product_id: product.id().clone(),
            product_name: product.name().to_string(),
            status,
        })
    }
}

impl fmt::Display for StockAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            StockStatus::LowStock { remaining } => {
                write!(f, "{}: 재고 부족 ({}개 남음)", self.product_name, remaining)
            }
            StockStatus::SoldOut => write!(f, "{}: 품절", self.product_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Won;

    #[test]
    fn test_alert_thresholds() {
        let plenty = Product::new("p1", "상품1", Won::new(10000), 5);
        assert!(StockAlert::for_product(&plenty, 5).is_none());

        let low = Product::new("p2", "상품2", Won::new(20000), 4);
        let alert = StockAlert::for_product(&low, 5).unwrap();
        assert_eq!(alert.status, StockStatus::LowStock { remaining: 4 });
        assert_eq!(alert.to_string(), "상품2: 재고 부족 (4개 남음)");

        let gone = Product::new("p4", "상품4", Won::new(15000), 0);
        let alert = StockAlert::for_product(&gone, 5).unwrap();
        assert_eq!(alert.status, StockStatus::SoldOut);
        assert_eq!(alert.to_string(), "상품4: 품절");
    }

    #[test]
    fn test_alert_json_shape() {
        let low = Product::new("p5", "상품5", Won::new(25000), 2);
        let alert = StockAlert::for_product(&low, 5).unwrap();
        let value = serde_json::to_value(&alert).unwrap();
        assert_eq!(value["product_id"], "p5");
        assert_eq!(value["status"], "low_stock");
        assert_eq!(value["remaining"], 2);
    }
}
