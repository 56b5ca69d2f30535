//! The product catalog.

use crate::catalog::{Product, ProductOption, StockAlert};
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::Won;

/// Ordered, mutable list of products.
///
/// Sole owner of product price and stock. Every mutation is checked before it
/// is applied, so a failed call leaves the catalog as it was.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from products, keeping their order.
    ///
    /// Fails if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, ShopError> {
        for (i, product) in products.iter().enumerate() {
            if products[..i].iter().any(|p| p.id() == product.id()) {
                return Err(ShopError::invalid_config(format!(
                    "duplicate product id: {}",
                    product.id()
                )));
            }
        }
        Ok(Self { products })
    }

    /// Products in catalog order.
    pub fn list_products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Like [`find_product`](Self::find_product) but unknown ids are an error.
    pub fn product(&self, id: &ProductId) -> Result<&Product, ShopError> {
        self.find_product(id)
            .ok_or_else(|| ShopError::UnknownProduct(id.clone()))
    }

    fn product_mut(&mut self, id: &ProductId) -> Result<&mut Product, ShopError> {
        self.products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| ShopError::UnknownProduct(id.clone()))
    }

    /// Take `amount` units out of stock.
    pub fn decrease_stock(&mut self, id: &ProductId, amount: u32) -> Result<u32, ShopError> {
        let product = self.product_mut(id)?;
        let remaining = product.stock().checked_sub(amount).ok_or_else(|| {
            ShopError::invalid_operation(format!(
                "cannot take {} units of {} with {} in stock",
                amount,
                id,
                product.stock()
            ))
        })?;
        product.set_stock(remaining);
        Ok(remaining)
    }

    /// Return `amount` units to stock. There is no upper bound.
    pub fn increase_stock(&mut self, id: &ProductId, amount: u32) -> Result<u32, ShopError> {
        let product = self.product_mut(id)?;
        let stock = product
            .stock()
            .checked_add(amount)
            .ok_or_else(|| ShopError::invalid_operation(format!("stock overflow for {}", id)))?;
        product.set_stock(stock);
        Ok(stock)
    }

    /// Cut the price by `fraction`: `price = round(price * (1 - fraction))`.
    ///
    /// Repeated calls compound.
    pub fn apply_discount_to_price(
        &mut self,
        id: &ProductId,
        fraction: f64,
    ) -> Result<Won, ShopError> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(ShopError::invalid_operation(format!(
                "discount fraction {} outside 0..=1",
                fraction
            )));
        }
        let product = self.product_mut(id)?;
        let price = product.price().discounted(fraction);
        product.set_price(price);
        Ok(price)
    }

    /// Selector entries in catalog order.
    pub fn options(&self) -> Vec<ProductOption> {
        self.products.iter().map(Product::option).collect()
    }

    /// Products below `threshold` units, in catalog order.
    pub fn stock_alerts(&self, threshold: u32) -> Vec<StockAlert> {
        self.products
            .iter()
            .filter_map(|p| StockAlert::for_product(p, threshold))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_products, StockStatus};

    fn seed() -> Catalog {
        Catalog::new(seed_products()).unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let products = vec![
            Product::new("p1", "A", Won::new(1), 1),
            Product::new("p1", "B", Won::new(2), 2),
        ];
        assert!(matches!(
            Catalog::new(products),
            Err(ShopError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_find_product() {
        let catalog = seed();
        assert_eq!(
            catalog.find_product(&"p2".into()).map(|p| p.price()),
            Some(Won::new(20000))
        );
        assert!(catalog.find_product(&"p9".into()).is_none());
        assert_eq!(
            catalog.product(&"p9".into()),
            Err(ShopError::UnknownProduct("p9".into()))
        );
    }

    #[test]
    fn test_decrease_stock() {
        let mut catalog = seed();
        assert_eq!(catalog.decrease_stock(&"p5".into(), 4), Ok(6));
        assert_eq!(catalog.product(&"p5".into()).unwrap().stock(), 6);
    }

    #[test]
    fn test_decrease_stock_beyond_stock_fails_unchanged() {
        let mut catalog = seed();
        let before = catalog.clone();
        let err = catalog.decrease_stock(&"p5".into(), 11).unwrap_err();
        assert!(matches!(err, ShopError::InvalidOperation(_)));
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_unknown_id_fails() {
        let mut catalog = seed();
        assert_eq!(
            catalog.decrease_stock(&"nope".into(), 1),
            Err(ShopError::UnknownProduct("nope".into()))
        );
        assert_eq!(
            catalog.increase_stock(&"nope".into(), 1),
            Err(ShopError::UnknownProduct("nope".into()))
        );
    }

    #[test]
    fn test_increase_stock_has_no_ceiling() {
        let mut catalog = seed();
        assert_eq!(catalog.increase_stock(&"p4".into(), 100), Ok(100));
    }

    #[test]
    fn test_price_discount_compounds() {
        let mut catalog = seed();
        assert_eq!(
            catalog.apply_discount_to_price(&"p1".into(), 0.2),
            Ok(Won::new(8000))
        );
        assert_eq!(
            catalog.apply_discount_to_price(&"p1".into(), 0.2),
            Ok(Won::new(6400))
        );
    }

    #[test]
    fn test_price_discount_rejects_bad_fraction() {
        let mut catalog = seed();
        assert!(catalog.apply_discount_to_price(&"p1".into(), 1.5).is_err());
        assert!(catalog.apply_discount_to_price(&"p1".into(), -0.1).is_err());
        assert_eq!(
            catalog.product(&"p1".into()).unwrap().price(),
            Won::new(10000)
        );
    }

    #[test]
    fn test_seed_stock_alerts() {
        let catalog = seed();
        let alerts = catalog.stock_alerts(5);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].product_id.as_str(), "p4");
        assert_eq!(alerts[0].status, StockStatus::SoldOut);
    }

    #[test]
    fn test_options_follow_catalog_order() {
        let catalog = seed();
        let options = catalog.options();
        let ids: Vec<&str> = options.iter().map(|o| o.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3", "p4", "p5"]);
        assert!(options[3].disabled);
    }
}
