//! Flash sale tick.

use rand::Rng;
use tracing::debug;

use crate::catalog::Catalog;
use crate::promotion::{percent, FlashSaleConfig, Promotion, PromotionKind};

/// Random inputs of one flash sale tick.
///
/// Sampled separately from the tick itself so the tick stays deterministic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashSaleDraw {
    /// Catalog position of the candidate product.
    pub index: usize,
    /// Uniform roll in `[0, 1)`.
    pub roll: f64,
}

impl FlashSaleDraw {
    /// Sample a draw for a catalog of `catalog_len` products.
    ///
    /// Returns `None` for an empty catalog.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, catalog_len: usize) -> Option<Self> {
        if catalog_len == 0 {
            return None;
        }
        Some(Self {
            index: rng.gen_range(0..catalog_len),
            roll: rng.gen(),
        })
    }
}

/// Run one flash sale tick.
///
/// The drawn product gets `rate` off its current price when the roll is below
/// `probability` and the product is in stock. Anything else is a no-op.
pub fn run_flash_sale(
    catalog: &mut Catalog,
    draw: FlashSaleDraw,
    config: &FlashSaleConfig,
) -> Option<Promotion> {
    let product = catalog.list_products().get(draw.index)?;
    if draw.roll >= config.probability || !product.is_in_stock() {
        debug!(product_id = %product.id(), roll = draw.roll, "flash sale skipped");
        return None;
    }

    let product_id = product.id().clone();
    let product_name = product.name().to_string();
    let new_price = catalog
        .apply_discount_to_price(&product_id, config.rate)
        .ok()?;

    let message = format!(
        "번개세일! {}이(가) {}% 할인 중입니다!",
        product_name,
        percent(config.rate)
    );
    Some(Promotion {
        kind: PromotionKind::FlashSale,
        product_id,
        product_name,
        new_price,
        message,
    })
}
