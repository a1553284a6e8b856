//! Domain error types.

use store::StoreError;
use thiserror::Error;

use crate::cart::CartError;
use crate::checkout::CheckoutError;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An error occurred in the cart engine.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// An error occurred during checkout.
    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// An error occurred in the persistence layer.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
