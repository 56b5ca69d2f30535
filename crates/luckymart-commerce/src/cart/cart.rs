//! Cart and cart line types.

use crate::catalog::Catalog;
use crate::error::ShopError;
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A line in the cart. Quantity is always at least 1.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

/// What a cart operation did to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineChange {
    /// Line now holds this quantity.
    Quantity(u32),
    /// Line was removed, this many units went back to stock.
    Removed(u32),
    /// Nothing to do.
    Unchanged,
}

/// A shopping cart.
///
/// Lines are unique by product and kept in insertion order. Every quantity
/// held here has been taken out of catalog stock, so each operation moves
/// units between the cart and the [`Catalog`] and never creates or loses any.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// Returns an error if:
    /// - The product is unknown
    /// - The product has no stock left
    /// - The line exists and its quantity plus one exceeds remaining stock
    pub fn add_item(
        &mut self,
        catalog: &mut Catalog,
        product_id: &ProductId,
    ) -> Result<LineChange, ShopError> {
        let stock = catalog.product(product_id)?.stock();
        if stock == 0 {
            return Err(ShopError::OutOfStock(product_id.clone()));
        }

        if let Some(index) = self.position(product_id) {
            let current = self.lines[index].quantity;
            let requested = current + 1;
            if requested > stock {
                return Err(ShopError::InsufficientStock {
                    product_id: product_id.clone(),
                    requested: i64::from(requested),
                    available: i64::from(stock),
                });
            }
            catalog.decrease_stock(product_id, 1)?;
            self.lines[index].quantity = requested;
            debug!(product_id = %product_id, quantity = requested, "cart line incremented");
            return Ok(LineChange::Quantity(requested));
        }

        catalog.decrease_stock(product_id, 1)?;
        self.lines.push(CartLine {
            product_id: product_id.clone(),
            quantity: 1,
        });
        debug!(product_id = %product_id, "cart line created");
        Ok(LineChange::Quantity(1))
    }

    /// Change a line's quantity by a signed delta.
    ///
    /// A resulting quantity of zero or less removes the line and restores the
    /// full quantity it held, not the delta. A zero delta changes nothing.
    pub fn change_quantity(
        &mut self,
        catalog: &mut Catalog,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<LineChange, ShopError> {
        let stock = catalog.product(product_id)?.stock();
        let index = self.position(product_id).ok_or_else(|| {
            ShopError::invalid_operation(format!("{} is not in the cart", product_id))
        })?;
        let current = self.lines[index].quantity;

        let requested = i64::from(current)
            .checked_add(delta)
            .ok_or_else(|| ShopError::invalid_operation("quantity change overflows"))?;

        if requested <= 0 {
            return self.remove_item(catalog, product_id);
        }

        // Units reserved by this line count as available for it.
        let available = i64::from(stock) + i64::from(current);
        if requested > available {
            return Err(ShopError::InsufficientStock {
                product_id: product_id.clone(),
                requested,
                available,
            });
        }

        let quantity = u32::try_from(requested)
            .map_err(|_| ShopError::invalid_operation("quantity out of range"))?;
        if quantity == current {
            return Ok(LineChange::Unchanged);
        }
        if quantity > current {
            catalog.decrease_stock(product_id, quantity - current)?;
        } else if quantity < current {
            catalog.increase_stock(product_id, current - quantity)?;
        }
        self.lines[index].quantity = quantity;
        debug!(product_id = %product_id, quantity, delta, "cart line quantity changed");
        Ok(LineChange::Quantity(quantity))
    }

    /// Remove a line and return its units to stock. No-op if absent.
    pub fn remove_item(
        &mut self,
        catalog: &mut Catalog,
        product_id: &ProductId,
    ) -> Result<LineChange, ShopError> {
        let Some(index) = self.position(product_id) else {
            return Ok(LineChange::Unchanged);
        };
        let quantity = self.lines[index].quantity;
        catalog.increase_stock(product_id, quantity)?;
        self.lines.remove(index);
        debug!(product_id = %product_id, restored = quantity, "cart line removed");
        Ok(LineChange::Removed(quantity))
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Get the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product_id == product_id)
    }

    /// Quantity held for a product, zero if absent.
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map(|l| l.quantity).unwrap_or(0)
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|l| &l.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_products;

    fn setup() -> (Cart, Catalog) {
        (Cart::new(), Catalog::new(seed_products()).unwrap())
    }

    fn stock(catalog: &Catalog, id: &str) -> u32 {
        catalog.product(&id.into()).unwrap().stock()
    }

    #[test]
    fn test_add_creates_line_and_takes_stock() {
        let (mut cart, mut catalog) = setup();
        let change = cart.add_item(&mut catalog, &"p1".into()).unwrap();
        assert_eq!(change, LineChange::Quantity(1));
        assert_eq!(cart.quantity_of(&"p1".into()), 1);
        assert_eq!(stock(&catalog, "p1"), 49);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p2".into()).unwrap();
        cart.add_item(&mut catalog, &"p2".into()).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(stock(&catalog, "p2"), 28);
    }

    #[test]
    fn test_add_out_of_stock() {
        let (mut cart, mut catalog) = setup();
        let err = cart.add_item(&mut catalog, &"p4".into()).unwrap_err();
        assert_eq!(err, ShopError::OutOfStock("p4".into()));
        assert!(cart.is_empty());
        assert_eq!(stock(&catalog, "p4"), 0);
    }

    #[test]
    fn test_add_unknown_product() {
        let (mut cart, mut catalog) = setup();
        let err = cart.add_item(&mut catalog, &"p9".into()).unwrap_err();
        assert_eq!(err, ShopError::UnknownProduct("p9".into()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_compares_next_quantity_with_remaining_stock() {
        let (mut cart, mut catalog) = setup();
        // p5 starts at 10: after 5 adds, 5 in cart and 5 left; 6 > 5 is refused.
        for _ in 0..5 {
            cart.add_item(&mut catalog, &"p5".into()).unwrap();
        }
        let before = (cart.clone(), catalog.clone());
        let err = cart.add_item(&mut catalog, &"p5".into()).unwrap_err();
        assert!(matches!(err, ShopError::InsufficientStock { requested: 6, available: 5, .. }));
        assert_eq!((cart, catalog), before);
    }

    #[test]
    fn test_change_quantity_up_and_down() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p3".into()).unwrap();

        let change = cart.change_quantity(&mut catalog, &"p3".into(), 4).unwrap();
        assert_eq!(change, LineChange::Quantity(5));
        assert_eq!(stock(&catalog, "p3"), 15);

        let change = cart.change_quantity(&mut catalog, &"p3".into(), -2).unwrap();
        assert_eq!(change, LineChange::Quantity(3));
        assert_eq!(stock(&catalog, "p3"), 17);
    }

    #[test]
    fn test_change_quantity_to_zero_restores_full_quantity() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p1".into()).unwrap();
        cart.change_quantity(&mut catalog, &"p1".into(), 2).unwrap();
        assert_eq!(stock(&catalog, "p1"), 47);

        let change = cart.change_quantity(&mut catalog, &"p1".into(), -99).unwrap();
        assert_eq!(change, LineChange::Removed(3));
        assert!(cart.line(&"p1".into()).is_none());
        assert_eq!(stock(&catalog, "p1"), 50);
    }

    #[test]
    fn test_change_quantity_may_use_all_reserved_and_remaining_stock() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p5".into()).unwrap();
        // 1 in cart + 9 in stock = 10 available for the line.
        assert_eq!(
            cart.change_quantity(&mut catalog, &"p5".into(), 9).unwrap(),
            LineChange::Quantity(10)
        );
        assert_eq!(stock(&catalog, "p5"), 0);
    }

    #[test]
    fn test_change_quantity_beyond_stock_fails_unchanged() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p5".into()).unwrap();
        let before = (cart.clone(), catalog.clone());

        let err = cart.change_quantity(&mut catalog, &"p5".into(), 10).unwrap_err();
        assert_eq!(
            err,
            ShopError::InsufficientStock {
                product_id: "p5".into(),
                requested: 11,
                available: 10,
            }
        );
        assert_eq!((cart, catalog), before);
    }

    #[test]
    fn test_change_quantity_absent_line() {
        let (mut cart, mut catalog) = setup();
        let err = cart.change_quantity(&mut catalog, &"p1".into(), 1).unwrap_err();
        assert!(matches!(err, ShopError::InvalidOperation(_)));
    }

    #[test]
    fn test_change_quantity_extreme_delta() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p1".into()).unwrap();

        let err = cart.change_quantity(&mut catalog, &"p1".into(), i64::MAX).unwrap_err();
        assert!(matches!(err, ShopError::InvalidOperation(_)));
        assert_eq!(cart.quantity_of(&"p1".into()), 1);

        let change = cart.change_quantity(&mut catalog, &"p1".into(), i64::MIN).unwrap();
        assert_eq!(change, LineChange::Removed(1));
        assert_eq!(stock(&catalog, "p1"), 50);
    }

    #[test]
    fn test_remove_item() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p2".into()).unwrap();
        cart.add_item(&mut catalog, &"p2".into()).unwrap();

        assert_eq!(
            cart.remove_item(&mut catalog, &"p2".into()).unwrap(),
            LineChange::Removed(2)
        );
        assert!(cart.is_empty());
        assert_eq!(stock(&catalog, "p2"), 30);

        assert_eq!(
            cart.remove_item(&mut catalog, &"p2".into()).unwrap(),
            LineChange::Unchanged
        );
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p3".into()).unwrap();
        cart.add_item(&mut catalog, &"p1".into()).unwrap();
        cart.add_item(&mut catalog, &"p3".into()).unwrap();
        let ids: Vec<&str> = cart.lines().iter().map(|l| l.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p3", "p1"]);
    }

    #[test]
    fn test_zero_delta_leaves_line_unchanged() {
        let (mut cart, mut catalog) = setup();
        cart.add_item(&mut catalog, &"p1".into()).unwrap();
        let change = cart.change_quantity(&mut catalog, &"p1".into(), 0).unwrap();
        assert_eq!(change, LineChange::Unchanged);
        assert_eq!(cart.quantity_of(&"p1".into()), 1);
        assert_eq!(stock(&catalog, "p1"), 49);
    }

    #[test]
    fn test_stock_is_conserved_across_operations() {
        let (mut cart, mut catalog) = setup();
        let initial: Vec<(ProductId, u32)> = catalog
            .list_products()
            .iter()
            .map(|p| (p.id().clone(), p.stock()))
            .collect();

        // Mixed sequence including failing calls; failures must not leak units.
        let ops: &[(&str, i64)] = &[
            ("p1", 0), ("p1", 0), ("p5", 0), ("p1", 7), ("p4", 0), ("p5", 20),
            ("p5", -1), ("p2", 0), ("p1", -3), ("p2", 40), ("p3", 0), ("p5", -5),
            ("p3", 19), ("p3", 1), ("p1", -99),
        ];
        for (id, delta) in ops {
            let id = ProductId::new(*id);
            let _ = if *delta == 0 {
                cart.add_item(&mut catalog, &id)
            } else {
                cart.change_quantity(&mut catalog, &id, *delta)
            };
            for (pid, start) in &initial {
                assert_eq!(stock(&catalog, pid.as_str()) + cart.quantity_of(pid), *start);
            }
            assert!(cart.lines().iter().all(|l| l.quantity > 0));
        }
    }
}
