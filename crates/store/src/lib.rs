//! Persistence layer for the storefront.
//!
//! Defines the persisted record types (products, carts, orders), the store
//! contracts, and two backends: an in-memory store used by the binary and
//! unit tests, and a PostgreSQL store exercised by integration tests.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod memory;
pub mod order;
pub mod postgres;
pub mod store;

pub use cart::{CartItem, CartRecord, Version};
pub use catalog::Product;
pub use common::{CartItemId, Money, OrderId, ProductId, UserId};
pub use error::{Result, StoreError};
pub use memory::InMemoryStore;
pub use order::{CustomerInfo, OrderLine, OrderRecord};
pub use postgres::PostgresStore;
pub use store::{CartStore, CatalogStore, OrderStore, Store};
