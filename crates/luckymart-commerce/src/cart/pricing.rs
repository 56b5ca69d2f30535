//! Cart pricing calculations.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, PricingRules};
use crate::catalog::Catalog;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::money::Won;

/// Pricing breakdown for the whole cart.
///
/// Derived data: always recomputed from cart, catalog and date, never stored
/// as a source of truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Per-line breakdown, in cart order.
    pub lines: Vec<SummaryLine>,
    /// Sum of undiscounted line totals.
    pub subtotal: Won,
    /// Final amount after all discounts, rounded once.
    pub total_amount: Won,
    /// Sum of quantities.
    pub item_count: u32,
    pub discount_label: Option<String>,
    /// Points this computation is worth.
    pub bonus_points_delta: u64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Amount saved compared with the subtotal.
    pub fn savings(&self) -> Won {
        Won::new(
            self.subtotal
                .amount()
                .saturating_sub(self.total_amount.amount()),
        )
    }
}

/// Pricing breakdown for a single cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Won,
    pub quantity: u32,
    /// `unit_price * quantity`.
    pub line_total: Won,
    /// Line discount applied to this line.
    pub discount_rate: f64,
}

/// Price the cart against current catalog prices.
///
/// Intermediate amounts stay fractional; only `total_amount` is rounded.
pub fn compute_summary(
    cart: &Cart,
    catalog: &Catalog,
    rules: &PricingRules,
    today: &impl Datelike,
) -> Result<CartSummary, ShopError> {
    let mut lines = Vec::with_capacity(cart.lines().len());
    let mut subtotal = 0.0;
    let mut discounted = 0.0;
    let mut item_count = 0u32;

    for line in cart.lines() {
        let product = catalog.product(&line.product_id)?;
        let line_total = product
            .price()
            .checked_times(line.quantity)
            .ok_or_else(|| ShopError::invalid_operation("line total overflows"))?;
        let discount_rate = rules.line_rate(&line.product_id, line.quantity);

        subtotal += line_total.as_f64();
        discounted += line_total.as_f64() * (1.0 - discount_rate);
        item_count = item_count.saturating_add(line.quantity);

        lines.push(SummaryLine {
            product_id: line.product_id.clone(),
            name: product.name().to_string(),
            unit_price: product.price(),
            quantity: line.quantity,
            line_total,
            discount_rate,
        });
    }

    let discounted = rules.apply_bulk_discount(discounted, subtotal, item_count);
    let discounted = rules.apply_day_discount(discounted, today);

    Ok(CartSummary {
        subtotal: lines.iter().map(|l| l.line_total).sum(),
        total_amount: Won::from_rounded(discounted),
        item_count,
        discount_label: rules.discount_label(item_count).map(str::to_string),
        bonus_points_delta: rules.bonus_points(discounted),
        lines,
    })
}
