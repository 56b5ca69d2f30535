//! Storefront error types.

use thiserror::Error;

use crate::ids::ProductId;

/// Errors that can occur in storefront operations.
///
/// Every variant is recoverable: catalog and cart state is left untouched when
/// an operation returns one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShopError {
    /// Add attempted while the product has no stock left.
    #[error("Product out of stock: {0}")]
    OutOfStock(ProductId),

    /// Requested quantity exceeds what the catalog can supply.
    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: i64,
        available: i64,
    },

    /// Referenced product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Malformed request against an internal operation.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration rejected by validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShopError {
    pub fn invalid_operation(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Message shown to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            ShopError::OutOfStock(_) => "해당 상품의 재고가 없습니다.".to_string(),
            ShopError::InsufficientStock { .. } => "재고가 부족합니다.".to_string(),
            ShopError::UnknownProduct(id) => format!("존재하지 않는 상품입니다: {}", id),
            ShopError::InvalidOperation(msg) => format!("처리할 수 없는 요청입니다: {}", msg),
            ShopError::InvalidConfig(msg) => format!("설정 오류: {}", msg),
        }
    }
}
