//! Cart service providing the mutation and read API for per-user carts.

use common::{CartItemId, Money, ProductId, UserId};
use store::{CartItem, CartRecord, CartStore, CatalogStore, StoreError, Version};

use crate::cart::{CartError, CartItemView, CartView};
use crate::error::DomainError;

/// How many times a mutation retries after losing the version race.
///
/// Every lost race means another writer committed, so a bounded number of
/// retries still guarantees progress under realistic contention.
const MAX_WRITE_ATTEMPTS: u32 = 8;

/// Service managing per-user carts.
///
/// The cart's total is never trusted from a previously persisted value:
/// every operation re-resolves current catalog prices and recomputes the
/// total before the cart is written or returned. Mutations are optimistic
/// read-modify-write cycles against the store's version token, so concurrent
/// mutations serialize per user and no increment is lost.
pub struct CartService<S> {
    store: S,
}

impl<S: CatalogStore + CartStore> CartService<S> {
    /// Creates a new cart service with the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the current cart for a user, creating and persisting an empty
    /// one (total zero) if none exists yet.
    #[tracing::instrument(skip(self))]
    pub async fn get_cart(&self, user_id: &UserId) -> Result<CartView, DomainError> {
        if let Some(cart) = self.store.get_cart(user_id).await? {
            return self.resolve_view(&cart).await;
        }

        let created = CartRecord::empty(user_id.clone());
        match self.store.put_cart(created, Some(Version::initial())).await {
            Ok(_) => {}
            // Lost a first-touch race; the other writer's cart wins.
            Err(StoreError::VersionConflict { .. }) => {}
            Err(e) => return Err(e.into()),
        }

        match self.store.get_cart(user_id).await? {
            Some(cart) => self.resolve_view(&cart).await,
            None => Ok(CartView::empty()),
        }
    }

    /// Adds a product to the cart.
    ///
    /// Product references are unique per cart: adding a product that is
    /// already present merges the quantity into the existing line instead of
    /// appending a duplicate.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(
        &self,
        user_id: &UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartView, DomainError> {
        if quantity < 1 {
            return Err(CartError::InvalidQuantity(quantity).into());
        }
        // Reject unknown products before touching the cart.
        if self.store.resolve(product_id).await?.is_none() {
            return Err(CartError::ProductNotFound(product_id).into());
        }

        let view = self
            .mutate(user_id, |cart| {
                if let Some(line) = cart.line_for_product(product_id) {
                    line.quantity += quantity;
                    return Ok(());
                }
                cart.items.push(CartItem::new(product_id, quantity));
                Ok(())
            })
            .await?;

        metrics::counter!("cart_items_added_total").increment(1);
        Ok(view)
    }

    /// Sets a line's quantity. Any value below 1 removes the line entirely.
    #[tracing::instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        user_id: &UserId,
        item_id: CartItemId,
        new_quantity: u32,
    ) -> Result<CartView, DomainError> {
        self.mutate(user_id, |cart| {
            let idx = cart
                .position_of(item_id)
                .ok_or(CartError::ItemNotFound(item_id))?;
            if new_quantity < 1 {
                cart.items.remove(idx);
            } else {
                cart.items[idx].quantity = new_quantity;
            }
            Ok(())
        })
        .await
    }

    /// Removes a line from the cart.
    ///
    /// Removing an id that is no longer present fails with `ItemNotFound`;
    /// repeated removal is not silently idempotent.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        user_id: &UserId,
        item_id: CartItemId,
    ) -> Result<CartView, DomainError> {
        self.mutate(user_id, |cart| {
            let idx = cart
                .position_of(item_id)
                .ok_or(CartError::ItemNotFound(item_id))?;
            cart.items.remove(idx);
            Ok(())
        })
        .await
    }

    /// Empties the cart and zeroes the total.
    ///
    /// Used by checkout after the order is durable. The write is
    /// unconditional: the reset must win over any concurrent stale mutation.
    #[tracing::instrument(skip(self))]
    pub async fn clear_cart(&self, user_id: &UserId) -> Result<(), DomainError> {
        let mut cart = match self.store.get_cart(user_id).await? {
            Some(cart) => cart,
            None => return Ok(()),
        };

        cart.items.clear();
        cart.total = Money::zero();
        self.store.put_cart(cart, None).await?;
        Ok(())
    }

    /// Runs one optimistic read-modify-write cycle, retrying when the write
    /// loses the version race.
    async fn mutate<F>(&self, user_id: &UserId, mutate_fn: F) -> Result<CartView, DomainError>
    where
        F: Fn(&mut CartRecord) -> Result<(), CartError>,
    {
        let mut attempts = 0;
        loop {
            let mut cart = match self.store.get_cart(user_id).await? {
                Some(cart) => cart,
                None => CartRecord::empty(user_id.clone()),
            };
            let expected = cart.version;

            mutate_fn(&mut cart)?;

            let view = self.resolve_view(&cart).await?;
            cart.total = view.total;

            match self.store.put_cart(cart, Some(expected)).await {
                Ok(_) => return Ok(view),
                Err(StoreError::VersionConflict { .. }) if attempts < MAX_WRITE_ATTEMPTS => {
                    attempts += 1;
                    tracing::debug!(%user_id, attempts, "cart write lost the version race, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Resolves every line's product from the catalog and recomputes the
    /// derived total in the same pass.
    async fn resolve_view(&self, cart: &CartRecord) -> Result<CartView, DomainError> {
        let mut items = Vec::with_capacity(cart.items.len());
        let mut total = Money::zero();

        for line in &cart.items {
            let product = self
                .store
                .resolve(line.product_id)
                .await?
                .ok_or(CartError::UnresolvedProduct(line.product_id))?;
            total += product.price.multiply(line.quantity);
            items.push(CartItemView {
                id: line.id,
                product,
                quantity: line.quantity,
            });
        }

        Ok(CartView { items, total })
    }
}
