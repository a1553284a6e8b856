use async_trait::async_trait;
use common::{OrderId, ProductId, UserId};

use crate::{CartRecord, OrderRecord, Product, Result, Version};

/// Read-only view of the product catalog.
///
/// The cart and checkout engines only ever read from the catalog; seeding is
/// an inherent method on each backend, outside this contract.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Lists the products currently in stock, in insertion order.
    async fn list_in_stock(&self) -> Result<Vec<Product>>;

    /// Looks up a product by id, returning `None` if it does not exist.
    async fn resolve(&self, product_id: ProductId) -> Result<Option<Product>>;
}

/// Storage for per-user carts.
///
/// Writes are atomic per user. With `Some(expected)`, `put_cart` is a
/// compare-and-swap against the persisted version (`Version::initial()`
/// meaning "no cart yet") and fails with `VersionConflict` on a mismatch.
/// With `None` the write is unconditional (use with caution).
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Loads the cart for a user, returning `None` if none is persisted.
    async fn get_cart(&self, user_id: &UserId) -> Result<Option<CartRecord>>;

    /// Persists the cart, stamping the next version and `updated_at`
    /// (`created_at` is preserved across writes). Returns the stored
    /// version.
    async fn put_cart(
        &self,
        cart: CartRecord,
        expected_version: Option<Version>,
    ) -> Result<Version>;
}

/// Append-only storage for completed orders.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Appends an order. Fails with `DuplicateOrderId` if the id is already
    /// taken; an existing order is never overwritten.
    async fn append(&self, order: OrderRecord) -> Result<()>;

    /// Loads an order by id.
    async fn get(&self, order_id: &OrderId) -> Result<Option<OrderRecord>>;

    /// Returns the number of stored orders.
    async fn order_count(&self) -> Result<usize>;
}

/// Convenience bound for backends implementing all three store contracts.
pub trait Store: CatalogStore + CartStore + OrderStore {}

// Blanket implementation for any full backend
impl<T: CatalogStore + CartStore + OrderStore> Store for T {}
