//! Product types.

use crate::ids::ProductId;
use crate::money::Won;
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Price and stock are only changed through [`Catalog`](super::Catalog)
/// operations; copies handed out as snapshots are read-only views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Won,
    stock: u32,
}

impl Product {
    /// Create a new product.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Won, stock: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Won {
        self.price
    }

    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Check if at least one unit is left.
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    pub(crate) fn set_price(&mut self, price: Won) {
        self.price = price;
    }

    pub(crate) fn set_stock(&mut self, stock: u32) {
        self.stock = stock;
    }

    /// Selector entry for this product.
    pub fn option(&self) -> ProductOption {
        ProductOption {
            product_id: self.id.clone(),
            label: format!("{} - {}", self.name, self.price),
            disabled: !self.is_in_stock(),
        }
    }
}

/// An entry of the product selector shown to the shopper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductOption {
    pub product_id: ProductId,
    /// "{name} - {price}원".
    pub label: String,
    /// Sold-out products cannot be picked.
    pub disabled: bool,
}

/// The catalog every session starts with.
pub fn seed_products() -> Vec<Product> {
    vec![
        Product::new("p1", "상품1", Won::new(10000), 50),
        Product::new("p2", "상품2", Won::new(20000), 30),
        Product::new("p3", "상품3", Won::new(30000), 20),
        Product::new("p4", "상품4", Won::new(15000), 0),
        Product::new("p5", "상품5", Won::new(25000), 10),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_products() {
        let products = seed_products();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0].id().as_str(), "p1");
        assert_eq!(products[2].price(), Won::new(30000));
        assert_eq!(products[3].stock(), 0);
        assert_eq!(products[4].name(), "상품5");
    }

    #[test]
    fn test_option_label_and_disabled() {
        let p1 = Product::new("p1", "상품1", Won::new(10000), 50);
        let option = p1.option();
        assert_eq!(option.label, "상품1 - 10000원");
        assert!(!option.disabled);

        let p4 = Product::new("p4", "상품4", Won::new(15000), 0);
        assert!(p4.option().disabled);
    }
}
