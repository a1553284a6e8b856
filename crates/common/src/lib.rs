//! Shared types used by every storefront crate.

mod types;

pub use types::{CartItemId, Money, OrderId, ProductId, UserId};
