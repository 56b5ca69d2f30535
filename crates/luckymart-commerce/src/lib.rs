//! Storefront pricing and cart-state engine for LuckyMart.
//!
//! - **Catalog**: products, stock, price cuts, stock alerts
//! - **Cart**: line items, discount rules, pricing
//! - **Promotion**: timer-driven flash sales and suggestions
//! - **Session**: the state machine tying it together, plus loyalty points
//!
//! # Example
//!
//! ```rust,ignore
//! use luckymart_commerce::prelude::*;
//!
//! let (session, mut promotions) =
//!     Session::start(StorefrontConfig::default(), Arc::new(SystemClock))?;
//!
//! let summary = session.add_to_cart(&ProductId::new("p1"))?;
//! println!("총액: {}", summary.total_amount);
//!
//! while let Some(promotion) = promotions.recv().await {
//!     println!("{}", promotion);
//! }
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod clock;
pub mod config;
pub mod loyalty;
pub mod promotion;
pub mod session;

pub use error::ShopError;
pub use ids::ProductId;
pub use money::Won;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ShopError;
    pub use crate::ids::ProductId;
    pub use crate::money::Won;

    // Catalog
    pub use crate::catalog::{
        seed_products, Catalog, Product, ProductOption, StockAlert, StockStatus,
    };

    // Cart
    pub use crate::cart::{
        compute_summary, Cart, CartLine, CartSummary, LineChange, PricingRules, SummaryLine,
    };

    // Promotion
    pub use crate::promotion::{
        FlashSaleConfig, FlashSaleDraw, Promotion, PromotionConfig, PromotionKind,
        SuggestionConfig,
    };

    // Session
    pub use crate::clock::{Clock, FixedClock, SystemClock};
    pub use crate::config::StorefrontConfig;
    pub use crate::loyalty::LoyaltyPoints;
    pub use crate::session::{Session, Storefront};
}
