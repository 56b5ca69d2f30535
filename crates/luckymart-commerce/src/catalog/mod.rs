//! Product catalog module.
//!
//! Contains the product type, the owning catalog, and stock status reporting.

mod catalog;
mod inventory;
mod product;

pub use catalog::Catalog;
pub use inventory::{StockAlert, StockStatus, DEFAULT_LOW_STOCK_THRESHOLD};
pub use product::{seed_products, Product, ProductOption};
