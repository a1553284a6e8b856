//! Resolved cart views returned to callers.

use common::{CartItemId, Money};
use serde::Serialize;
use store::Product;

/// A cart line with its product resolved from the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: CartItemId,
    pub product: Product,
    pub quantity: u32,
}

/// A cart as returned to callers: resolved lines plus the derived total.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    #[serde(rename = "total_cents")]
    pub total: Money,
}

impl CartView {
    /// An empty cart view with zero total.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Money::zero(),
        }
    }
}
