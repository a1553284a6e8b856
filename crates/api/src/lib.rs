//! HTTP API server for the storefront.
//!
//! Exposes the catalog, the per-user cart, and checkout over REST, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{delete, get, post, put};
use common::Money;
use domain::{CartService, CheckoutService};
use metrics_exporter_prometheus::PrometheusHandle;
use store::{Product, Store};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// The single identity this deployment serves.
///
/// The engines are keyed by user id throughout; only the HTTP layer pins the
/// key, so additional identities need no engine changes.
pub const DEFAULT_USER_ID: &str = "User-123";

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: Store + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health::check))
        .route("/api/products", get(routes::products::list::<S>))
        .route("/api/cart", get(routes::cart::get::<S>))
        .route("/api/cart", post(routes::cart::add::<S>))
        .route("/api/cart/{item_id}", put(routes::cart::update::<S>))
        .route("/api/cart/{item_id}", delete(routes::cart::remove::<S>))
        .route("/api/checkout", post(routes::checkout::create::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the shared application state over the given store.
pub fn create_default_state<S: Store + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        cart_service: CartService::new(store.clone()),
        checkout_service: CheckoutService::new(store.clone()),
        store,
    })
}

/// A small demo catalog for the in-memory deployment.
pub fn demo_products() -> Vec<Product> {
    vec![
        Product::new(
            "Ceramic Mug",
            "Stoneware mug, 350 ml",
            Money::from_cents(999),
            true,
        ),
        Product::new("Gel Pen", "0.5 mm, black ink", Money::from_cents(150), true),
        Product::new(
            "Notebook",
            "A5 dotted, 120 pages",
            Money::from_cents(549),
            true,
        ),
        Product::new(
            "Water Bottle",
            "Insulated, 500 ml",
            Money::from_cents(1899),
            true,
        ),
        Product::new("Tote Bag", "Canvas, natural", Money::from_cents(1250), false),
    ]
}
