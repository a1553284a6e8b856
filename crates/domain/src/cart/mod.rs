//! Cart engine: the mutable per-user cart and its consistency rules.

mod service;
mod view;

pub use service::CartService;
pub use view::{CartItemView, CartView};

use common::{CartItemId, ProductId};
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart has no line with this id.
    #[error("Cart item not found: {0}")]
    ItemNotFound(CartItemId),

    /// Quantity must be at least 1.
    #[error("Invalid quantity: {0} (must be at least 1)")]
    InvalidQuantity(u32),

    /// A cart line references a product the catalog can no longer resolve.
    /// A data-integrity gap between cart and catalog, not a client error.
    #[error("Cart references unknown product: {0}")]
    UnresolvedProduct(ProductId),
}
