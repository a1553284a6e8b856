//! Checkout service.

use chrono::Utc;
use common::{Money, OrderId, UserId};
use store::{
    CartStore, CatalogStore, CustomerInfo, OrderLine, OrderRecord, OrderStore, StoreError,
};

use crate::cart::CartService;
use crate::checkout::{CheckoutError, CheckoutItem};
use crate::error::DomainError;

/// How many fresh codes to try when an order id collides.
const MAX_ID_ATTEMPTS: u32 = 8;

/// Service converting cart snapshots into durable orders.
///
/// Line prices are taken from the client-supplied snapshot and are not
/// re-resolved from the catalog, so a stored order is unaffected by later
/// catalog edits. The flip side is that the engine trusts the caller's price
/// data; this storefront accepts that trade-off.
pub struct CheckoutService<S> {
    store: S,
    carts: CartService<S>,
}

impl<S: CatalogStore + CartStore + OrderStore + Clone> CheckoutService<S> {
    /// Creates a new checkout service with the given store.
    pub fn new(store: S) -> Self {
        Self {
            carts: CartService::new(store.clone()),
            store,
        }
    }

    /// Validates the snapshot, persists the order, and resets the cart.
    ///
    /// The order append is the authoritative success signal: if the cart
    /// reset fails afterwards the failure is logged and the order is still
    /// returned. A stale cart is corrected on its next mutation, since every
    /// mutation rewrites the full record.
    #[tracing::instrument(skip(self, items, customer))]
    pub async fn checkout(
        &self,
        user_id: &UserId,
        items: Vec<CheckoutItem>,
        customer: CustomerInfo,
    ) -> Result<OrderRecord, DomainError> {
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart.into());
        }
        if customer.name.is_empty() {
            return Err(CheckoutError::MissingName.into());
        }
        if customer.email.is_empty() {
            return Err(CheckoutError::MissingEmail.into());
        }

        let mut lines = Vec::with_capacity(items.len());
        let mut total = Money::zero();
        for item in &items {
            if item.product.price.is_negative() {
                return Err(CheckoutError::InvalidPrice(item.product.price).into());
            }
            let subtotal = item.product.price.multiply(item.quantity);
            total += subtotal;
            lines.push(OrderLine {
                name: item.product.name.clone(),
                price: item.product.price,
                quantity: item.quantity,
                subtotal,
            });
        }

        let order = self.append_with_fresh_id(lines, total, customer).await?;
        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(order_id = %order.order_id, total = %order.total, "order placed");

        if let Err(e) = self.carts.clear_cart(user_id).await {
            // The order is already durable; the stale cart self-corrects on
            // its next mutation.
            tracing::warn!(%user_id, error = %e, "failed to clear cart after checkout");
        }

        Ok(order)
    }

    /// Allocates an order id and appends the order, regenerating the code
    /// when the store reports it is already taken.
    async fn append_with_fresh_id(
        &self,
        items: Vec<OrderLine>,
        total: Money,
        customer_info: CustomerInfo,
    ) -> Result<OrderRecord, DomainError> {
        let mut attempts = 0;
        loop {
            let order = OrderRecord {
                order_id: OrderId::generate(),
                customer_info: customer_info.clone(),
                items: items.clone(),
                total,
                timestamp: Utc::now(),
            };

            match self.store.append(order.clone()).await {
                Ok(()) => return Ok(order),
                Err(StoreError::DuplicateOrderId(id)) if attempts < MAX_ID_ATTEMPTS => {
                    attempts += 1;
                    tracing::debug!(%id, attempts, "order id collision, regenerating");
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
