//! Shopping cart module.
//!
//! Contains the cart, its discount rules, and the pricing engine.

mod cart;
mod discount;
mod pricing;

pub use cart::{Cart, CartLine, LineChange};
pub use discount::{PricingRules, BULK_LABEL};
pub use pricing::{compute_summary, CartSummary, SummaryLine};

pub(crate) use discount::check_fraction;
