use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use common::{OrderId, ProductId, UserId};
use tokio::sync::RwLock;

use crate::{
    CartRecord, OrderRecord, Product, Result, StoreError, Version,
    store::{CartStore, CatalogStore, OrderStore},
};

/// In-memory store backing the binary and the unit tests.
///
/// Implements all three store contracts over `RwLock`ed maps and provides
/// the same interface as the PostgreSQL implementation. Cloning shares the
/// underlying state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    // Vec keeps catalog insertion order for listing
    products: Arc<RwLock<Vec<Product>>>,
    carts: Arc<RwLock<HashMap<UserId, CartRecord>>>,
    orders: Arc<RwLock<HashMap<OrderId, OrderRecord>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a product to the catalog (seeding and tests).
    pub async fn insert_product(&self, product: Product) {
        self.products.write().await.push(product);
    }

    /// Clears all products, carts, and orders.
    pub async fn clear(&self) {
        self.products.write().await.clear();
        self.carts.write().await.clear();
        self.orders.write().await.clear();
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn list_in_stock(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().filter(|p| p.in_stock).cloned().collect())
    }

    async fn resolve(&self, product_id: ProductId) -> Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == product_id).cloned())
    }
}

#[async_trait]
impl CartStore for InMemoryStore {
    async fn get_cart(&self, user_id: &UserId) -> Result<Option<CartRecord>> {
        let carts = self.carts.read().await;
        Ok(carts.get(user_id).cloned())
    }

    async fn put_cart(
        &self,
        mut cart: CartRecord,
        expected_version: Option<Version>,
    ) -> Result<Version> {
        let mut carts = self.carts.write().await;

        let actual = carts
            .get(&cart.user_id)
            .map(|c| c.version)
            .unwrap_or_else(Version::initial);

        if let Some(expected) = expected_version
            && actual != expected
        {
            tracing::debug!(user_id = %cart.user_id, %expected, %actual, "cart version conflict");
            return Err(StoreError::VersionConflict {
                user_id: cart.user_id.clone(),
                expected,
                actual,
            });
        }

        let new_version = actual.next();
        cart.version = new_version;
        cart.updated_at = Utc::now();
        if let Some(existing) = carts.get(&cart.user_id) {
            cart.created_at = existing.created_at;
        }
        carts.insert(cart.user_id.clone(), cart);

        Ok(new_version)
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn append(&self, order: OrderRecord) -> Result<()> {
        let mut orders = self.orders.write().await;
        if orders.contains_key(&order.order_id) {
            return Err(StoreError::DuplicateOrderId(order.order_id));
        }
        orders.insert(order.order_id.clone(), order);
        Ok(())
    }

    async fn get(&self, order_id: &OrderId) -> Result<Option<OrderRecord>> {
        let orders = self.orders.read().await;
        Ok(orders.get(order_id).cloned())
    }

    async fn order_count(&self) -> Result<usize> {
        Ok(self.orders.read().await.len())
    }
}
