//! Catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use store::{Product, Store};

use super::AppState;
use crate::error::ApiError;

/// GET /api/products — all in-stock products.
#[tracing::instrument(skip(state))]
pub async fn list<S: Store + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state
        .store
        .list_in_stock()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(products))
}
