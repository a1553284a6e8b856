//! Checkout engine: converts a cart snapshot into an immutable order.

mod service;

pub use service::CheckoutService;

use common::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Client-supplied view of one product inside a checkout snapshot.
///
/// Carries the name and price the client saw; the stored order lines are
/// built from this snapshot, not from the live catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
}

/// One line of the checkout snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product: ProductSnapshot,
    pub quantity: u32,
}

/// Errors that can occur during checkout validation.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The snapshot has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Customer name is required.
    #[error("Customer name is required")]
    MissingName,

    /// Customer email is required.
    #[error("Customer email is required")]
    MissingEmail,

    /// A snapshot carried a negative price; catalog prices are never
    /// negative, so the input is malformed.
    #[error("Invalid price: {0}")]
    InvalidPrice(Money),
}
