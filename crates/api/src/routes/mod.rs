//! Route handlers and shared application state.

pub mod cart;
pub mod checkout;
pub mod health;
pub mod metrics;
pub mod products;

use axum::Json;
use domain::{CartService, CheckoutService};
use serde_json::{Value, json};

/// Shared application state accessible from all handlers.
pub struct AppState<S> {
    pub cart_service: CartService<S>,
    pub checkout_service: CheckoutService<S>,
    pub store: S,
}

/// GET / — service name and endpoint index.
pub async fn index() -> Json<Value> {
    Json(json!({
        "message": "Storefront API",
        "endpoints": {
            "products": "GET /api/products",
            "cart": "GET /api/cart",
            "add_to_cart": "POST /api/cart",
            "update_cart_item": "PUT /api/cart/{item_id}",
            "remove_cart_item": "DELETE /api/cart/{item_id}",
            "checkout": "POST /api/checkout",
        }
    }))
}
