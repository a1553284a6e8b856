//! Cart endpoints for the deployment's fixed user.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::{CartItemId, ProductId, UserId};
use domain::CartView;
use serde::{Deserialize, Serialize};
use store::Store;
use uuid::Uuid;

use super::AppState;
use crate::DEFAULT_USER_ID;
use crate::error::ApiError;

// -- Request types --

#[derive(Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: u32,
}

// -- Response types --

#[derive(Serialize)]
pub struct AddToCartResponse {
    pub message: &'static str,
    pub cart: CartView,
}

// -- Handlers --

/// GET /api/cart — the current cart, created empty on first access.
#[tracing::instrument(skip(state))]
pub async fn get<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<CartView>, ApiError> {
    let user_id = UserId::from(DEFAULT_USER_ID);
    let cart = state.cart_service.get_cart(&user_id).await?;
    Ok(Json(cart))
}

/// POST /api/cart — add a product, merging into an existing line.
#[tracing::instrument(skip(state, req))]
pub async fn add<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<AddToCartResponse>, ApiError> {
    let raw_id = req
        .product_id
        .ok_or_else(|| ApiError::BadRequest("Product ID is required".to_string()))?;
    let product_id = parse_product_id(&raw_id)?;

    let user_id = UserId::from(DEFAULT_USER_ID);
    let cart = state
        .cart_service
        .add_item(&user_id, product_id, req.quantity)
        .await?;

    Ok(Json(AddToCartResponse {
        message: "Item added to cart",
        cart,
    }))
}

/// PUT /api/cart/:item_id — set a line's quantity; zero removes the line.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(item_id): Path<String>,
    Json(req): Json<UpdateQuantityRequest>,
) -> Result<Json<CartView>, ApiError> {
    let item_id = parse_item_id(&item_id)?;

    let user_id = UserId::from(DEFAULT_USER_ID);
    let cart = state
        .cart_service
        .update_quantity(&user_id, item_id, req.quantity)
        .await?;
    Ok(Json(cart))
}

/// DELETE /api/cart/:item_id — remove a line.
#[tracing::instrument(skip(state))]
pub async fn remove<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(item_id): Path<String>,
) -> Result<Json<CartView>, ApiError> {
    let item_id = parse_item_id(&item_id)?;

    let user_id = UserId::from(DEFAULT_USER_ID);
    let cart = state.cart_service.remove_item(&user_id, item_id).await?;
    Ok(Json(cart))
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid product id: {e}")))?;
    Ok(ProductId::from_uuid(uuid))
}

fn parse_item_id(raw: &str) -> Result<CartItemId, ApiError> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|e| ApiError::BadRequest(format!("Invalid cart item id: {e}")))?;
    Ok(CartItemId::from_uuid(uuid))
}
