//! Domain layer for the storefront.
//!
//! This crate provides the two engines that own all state-transition rules:
//! - The cart engine (`CartService`): the mutable per-user cart, its derived
//!   total, and the serialization of concurrent mutations
//! - The checkout engine (`CheckoutService`): conversion of a cart snapshot
//!   into an immutable, durably stored order
//!
//! Persistence and catalog access go through the store contracts, so the
//! engines run unchanged against the in-memory and PostgreSQL backends.

pub mod cart;
pub mod checkout;
pub mod error;

pub use cart::{CartError, CartItemView, CartService, CartView};
pub use checkout::{CheckoutError, CheckoutItem, CheckoutService, ProductSnapshot};
pub use error::DomainError;
