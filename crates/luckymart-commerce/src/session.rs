//! Shopper session: the storefront state plus its promotion processes.
//!
//! [`Storefront`] is the synchronous state machine. Every shopper command and
//! every promotion tick is a method on it. [`Session`] puts it behind a mutex
//! and runs the promotion timers against it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::{debug, info, warn};

use crate::cart::{compute_summary, Cart, CartSummary, LineChange, PricingRules};
use crate::catalog::{Catalog, Product, ProductOption, StockAlert};
use crate::clock::Clock;
use crate::config::StorefrontConfig;
use crate::error::ShopError;
use crate::ids::ProductId;
use crate::loyalty::LoyaltyPoints;
use crate::promotion::{
    run_flash_sale, run_suggestion, FlashSaleConfig, FlashSaleDraw, Promotion,
    PromotionScheduler, SuggestionConfig,
};

/// Storefront shared between the shopper and the promotion tasks.
pub type SharedStorefront = Arc<Mutex<Storefront>>;

/// Lock the storefront, recovering the state if a holder panicked.
pub(crate) fn lock(storefront: &SharedStorefront) -> MutexGuard<'_, Storefront> {
    storefront.lock().unwrap_or_else(PoisonError::into_inner)
}

/// All mutable state of one shopping session.
pub struct Storefront {
    catalog: Catalog,
    cart: Cart,
    rules: PricingRules,
    clock: Arc<dyn Clock>,
    low_stock_threshold: u32,
    flash_sale: FlashSaleConfig,
    suggestion: SuggestionConfig,
    last_selected: Option<ProductId>,
    loyalty: LoyaltyPoints,
    halted: bool,
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("catalog", &self.catalog)
            .field("cart", &self.cart)
            .field("last_selected", &self.last_selected)
            .field("loyalty", &self.loyalty)
            .field("halted", &self.halted)
            .finish_non_exhaustive()
    }
}

impl Storefront {
    /// Build a storefront from a validated configuration.
    pub fn new(config: &StorefrontConfig, clock: Arc<dyn Clock>) -> Result<Self, ShopError> {
        config.validate()?;
        Ok(Self {
            catalog: config.build_catalog()?,
            cart: Cart::new(),
            rules: config.pricing.clone(),
            clock,
            low_stock_threshold: config.low_stock_threshold,
            flash_sale: config.promotions.flash_sale.clone(),
            suggestion: config.promotions.suggestion.clone(),
            last_selected: None,
            loyalty: LoyaltyPoints::default(),
            halted: false,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Copy of the current products, prices and stock.
    pub fn catalog_snapshot(&self) -> Vec<Product> {
        self.catalog.list_products().to_vec()
    }

    pub fn product_options(&self) -> Vec<ProductOption> {
        self.catalog.options()
    }

    pub fn stock_alerts(&self) -> Vec<StockAlert> {
        self.catalog.stock_alerts(self.low_stock_threshold)
    }

    pub fn loyalty_points(&self) -> LoyaltyPoints {
        self.loyalty
    }

    pub fn last_selected(&self) -> Option<&ProductId> {
        self.last_selected.as_ref()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Price the cart as it stands. Does not touch the point balance.
    pub fn cart_summary(&self) -> Result<CartSummary, ShopError> {
        compute_summary(&self.cart, &self.catalog, &self.rules, &self.clock.today())
    }

    /// Add one unit of a product to the cart.
    pub fn add_to_cart(&mut self, product_id: &ProductId) -> Result<CartSummary, ShopError> {
        let change = self
            .cart
            .add_item(&mut self.catalog, product_id)
            .inspect_err(|err| warn!(%product_id, error = %err, "add to cart rejected"))?;
        self.after_mutation(change)
    }

    /// Change a cart line by `delta` units. Zero or less removes the line.
    pub fn change_quantity(
        &mut self,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<CartSummary, ShopError> {
        let change = self
            .cart
            .change_quantity(&mut self.catalog, product_id, delta)
            .inspect_err(|err| warn!(%product_id, delta, error = %err, "quantity change rejected"))?;
        self.after_mutation(change)
    }

    /// Drop a cart line and return its units to stock.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> Result<CartSummary, ShopError> {
        let change = self.cart.remove_item(&mut self.catalog, product_id)?;
        self.after_mutation(change)
    }

    /// Remember the shopper's pick for the suggestion process.
    pub fn select_product(&mut self, product_id: &ProductId) -> Result<(), ShopError> {
        self.catalog.product(product_id)?;
        debug!(%product_id, "product selected");
        self.last_selected = Some(product_id.clone());
        Ok(())
    }

    /// Refuse any further promotion ticks.
    pub fn halt(&mut self) {
        self.halted = true;
    }

    /// One flash sale tick. `None` when halted or when nothing changed.
    pub fn flash_sale_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Promotion> {
        if self.halted {
            return None;
        }
        let draw = FlashSaleDraw::sample(rng, self.catalog.len())?;
        let promotion = run_flash_sale(&mut self.catalog, draw, &self.flash_sale)?;
        info!(product_id = %promotion.product_id, new_price = %promotion.new_price, "flash sale");
        Some(promotion)
    }

    /// One suggestion tick. `None` when halted or when nothing changed.
    pub fn suggestion_tick(&mut self) -> Option<Promotion> {
        if self.halted {
            return None;
        }
        let promotion =
            run_suggestion(&mut self.catalog, self.last_selected.as_ref(), &self.suggestion)?;
        info!(product_id = %promotion.product_id, new_price = %promotion.new_price, "suggestion");
        Some(promotion)
    }

    /// Recompute after a command; points accrue only when the cart changed.
    fn after_mutation(&mut self, change: LineChange) -> Result<CartSummary, ShopError> {
        let summary = self.cart_summary()?;
        if change != LineChange::Unchanged {
            let balance = self.loyalty.accrue(summary.bonus_points_delta);
            info!(
                total = %summary.total_amount,
                items = summary.item_count,
                points = balance,
                "cart recomputed"
            );
        }
        Ok(summary)
    }
}

/// A running storefront with its promotion processes.
///
/// Dropping the session stops the processes.
#[derive(Debug)]
pub struct Session {
    storefront: SharedStorefront,
    scheduler: PromotionScheduler,
}

impl Session {
    /// Start a session and, if enabled, its promotion processes.
    ///
    /// Must be called from within a tokio runtime when promotions are
    /// enabled. Promotion notifications arrive on the returned receiver.
    pub fn start(
        config: StorefrontConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, UnboundedReceiver<Promotion>), ShopError> {
        let storefront = Arc::new(Mutex::new(Storefront::new(&config, clock)?));
        let (sender, receiver) = mpsc::unbounded_channel();

        let scheduler = if config.promotions.enabled {
            let rng = match config.rng_seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            PromotionScheduler::start(&storefront, &config.promotions, sender, rng)
        } else {
            debug!("promotions disabled");
            PromotionScheduler::idle()
        };

        info!(products = config.catalog.len(), "session started");
        Ok((
            Self {
                storefront,
                scheduler,
            },
            receiver,
        ))
    }

    fn with<T>(&self, f: impl FnOnce(&mut Storefront) -> T) -> T {
        f(&mut lock(&self.storefront))
    }

    pub fn catalog_snapshot(&self) -> Vec<Product> {
        self.with(|s| s.catalog_snapshot())
    }

    pub fn product_options(&self) -> Vec<ProductOption> {
        self.with(|s| s.product_options())
    }

    pub fn stock_alerts(&self) -> Vec<StockAlert> {
        self.with(|s| s.stock_alerts())
    }

    pub fn cart_summary(&self) -> Result<CartSummary, ShopError> {
        self.with(|s| s.cart_summary())
    }

    pub fn loyalty_points(&self) -> LoyaltyPoints {
        self.with(|s| s.loyalty_points())
    }

    pub fn last_selected(&self) -> Option<ProductId> {
        self.with(|s| s.last_selected().cloned())
    }

    pub fn add_to_cart(&self, product_id: &ProductId) -> Result<CartSummary, ShopError> {
        self.with(|s| s.add_to_cart(product_id))
    }

    pub fn change_quantity(
        &self,
        product_id: &ProductId,
        delta: i64,
    ) -> Result<CartSummary, ShopError> {
        self.with(|s| s.change_quantity(product_id, delta))
    }

    pub fn remove_from_cart(&self, product_id: &ProductId) -> Result<CartSummary, ShopError> {
        self.with(|s| s.remove_from_cart(product_id))
    }

    pub fn select_product(&self, product_id: &ProductId) -> Result<(), ShopError> {
        self.with(|s| s.select_product(product_id))
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Stop both promotion processes. No tick runs after this returns.
    pub fn stop(&mut self) {
        self.with(Storefront::halt);
        self.scheduler.stop();
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.stop();
    }
}
