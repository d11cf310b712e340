//! # Shop Error Types Module
//!
//! This module defines the error taxonomy of the storefront core. Every
//! variant is a recoverable, user-facing condition: handlers turn them into
//! short replies and the process keeps running.

use thiserror::Error;

/// Custom error types for catalog, cart and checkout operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// Catalog index outside `[0, len-1]`
    #[error("Product not found: index {index} (catalog has {len} products)")]
    NotFound { index: usize, len: usize },
    /// Navigation past the last product
    #[error("Already at the last product")]
    AtEnd,
    /// Navigation before the first product
    #[error("Already at the first product")]
    AtStart,
    /// Cart add with a product index that is not in the catalog
    #[error("Invalid product: index {index}")]
    InvalidProduct { index: usize },
    /// Cart remove with a position that is not in the cart
    #[error("Invalid cart position: {position} (cart has {len} items)")]
    InvalidPosition { position: usize, len: usize },
    /// Checkout with nothing to order
    #[error("Cart is empty")]
    EmptyCart,
}

/// Result alias used throughout the shop core
pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_formatting() {
        let err = ShopError::InvalidPosition { position: 4, len: 2 };
        assert_eq!(err.to_string(), "Invalid cart position: 4 (cart has 2 items)");
        assert_eq!(ShopError::EmptyCart.to_string(), "Cart is empty");
    }
}
