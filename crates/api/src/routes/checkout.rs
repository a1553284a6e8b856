//! Checkout endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use chrono::{DateTime, Utc};
use common::UserId;
use domain::CheckoutItem;
use serde::{Deserialize, Serialize};
use store::{CustomerInfo, OrderLine, Store};

use super::AppState;
use crate::DEFAULT_USER_ID;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub cart_items: Vec<CheckoutItem>,
    pub customer_info: Option<CustomerInfoRequest>,
}

#[derive(Deserialize)]
pub struct CustomerInfoRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    pub customer_info: CustomerInfo,
    pub items: Vec<OrderLine>,
    pub total_cents: i64,
    pub timestamp: DateTime<Utc>,
    pub message: &'static str,
}

// -- Handler --

/// POST /api/checkout — convert the submitted cart snapshot into an order.
#[tracing::instrument(skip(state, req))]
pub async fn create<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    let customer = req
        .customer_info
        .ok_or_else(|| ApiError::BadRequest("Customer information is required".to_string()))?;
    let customer = CustomerInfo {
        name: customer.name,
        email: customer.email,
    };

    let user_id = UserId::from(DEFAULT_USER_ID);
    let order = state
        .checkout_service
        .checkout(&user_id, req.cart_items, customer)
        .await?;

    Ok(Json(CheckoutResponse {
        order_id: order.order_id.to_string(),
        customer_info: order.customer_info,
        items: order.items,
        total_cents: order.total.cents(),
        timestamp: order.timestamp,
        message: "Order placed successfully!",
    }))
}
