//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration
//! ```

use std::sync::Arc;

use chrono::Utc;
use serial_test::serial;
use sqlx::PgPool;
use store::{
    CartItem, CartRecord, CartStore, CatalogStore, CustomerInfo, Money, OrderId, OrderLine,
    OrderRecord, OrderStore, PostgresStore, Product, ProductId, StoreError, UserId, Version,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for the schema
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            // Run migrations using raw_sql to execute multiple statements
            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_storefront_tables.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE products, carts, orders")
        .execute(&pool)
        .await
        .unwrap();

    PostgresStore::new(pool)
}

fn test_order(code: &str) -> OrderRecord {
    OrderRecord {
        order_id: OrderId::new(code),
        customer_info: CustomerInfo {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        },
        items: vec![
            OrderLine {
                name: "Mug".to_string(),
                price: Money::from_cents(999),
                quantity: 2,
                subtotal: Money::from_cents(1998),
            },
            OrderLine {
                name: "Pen".to_string(),
                price: Money::from_cents(150),
                quantity: 3,
                subtotal: Money::from_cents(450),
            },
        ],
        total: Money::from_cents(2448),
        timestamp: Utc::now(),
    }
}

#[tokio::test]
#[serial]
async fn insert_and_resolve_product() {
    let store = get_test_store().await;

    let product = Product::new("Mug", "Ceramic mug", Money::from_cents(999), true);
    store.insert_product(product.clone()).await.unwrap();

    let resolved = store.resolve(product.id).await.unwrap().unwrap();
    assert_eq!(resolved.name, "Mug");
    assert_eq!(resolved.price.cents(), 999);
    assert!(resolved.in_stock);

    let missing = store.resolve(ProductId::new()).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[serial]
async fn list_in_stock_filters_and_keeps_insertion_order() {
    let store = get_test_store().await;

    let mug = Product::new("Mug", "Ceramic mug", Money::from_cents(999), true);
    let tote = Product::new("Tote", "Canvas tote", Money::from_cents(1250), false);
    let pen = Product::new("Pen", "Gel pen", Money::from_cents(150), true);
    store.insert_product(mug.clone()).await.unwrap();
    store.insert_product(tote).await.unwrap();
    store.insert_product(pen.clone()).await.unwrap();

    let listed = store.list_in_stock().await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, mug.id);
    assert_eq!(listed[1].id, pen.id);
}

#[tokio::test]
#[serial]
async fn cart_roundtrip_preserves_items() {
    let store = get_test_store().await;
    let user_id = UserId::from("User-123");

    assert!(store.get_cart(&user_id).await.unwrap().is_none());

    let mut cart = CartRecord::empty(user_id.clone());
    let product_id = ProductId::new();
    cart.items.push(CartItem::new(product_id, 2));
    cart.total = Money::from_cents(1998);

    let version = store
        .put_cart(cart, Some(Version::initial()))
        .await
        .unwrap();
    assert_eq!(version, Version::first());

    let loaded = store.get_cart(&user_id).await.unwrap().unwrap();
    assert_eq!(loaded.items.len(), 1);
    assert_eq!(loaded.items[0].product_id, product_id);
    assert_eq!(loaded.items[0].quantity, 2);
    assert_eq!(loaded.total.cents(), 1998);
    assert_eq!(loaded.version, Version::first());
}

#[tokio::test]
#[serial]
async fn stale_cart_version_is_rejected() {
    let store = get_test_store().await;
    let user_id = UserId::from("User-123");

    store
        .put_cart(CartRecord::empty(user_id.clone()), Some(Version::initial()))
        .await
        .unwrap();

    let result = store
        .put_cart(CartRecord::empty(user_id.clone()), Some(Version::initial()))
        .await;

    match result {
        Err(StoreError::VersionConflict { expected, actual, .. }) => {
            assert_eq!(expected, Version::initial());
            assert_eq!(actual, Version::first());
        }
        other => panic!("expected version conflict, got {other:?}"),
    }

    let version = store
        .put_cart(CartRecord::empty(user_id.clone()), Some(Version::first()))
        .await
        .unwrap();
    assert_eq!(version, Version::new(2));
}

#[tokio::test]
#[serial]
async fn unconditional_put_skips_version_check() {
    let store = get_test_store().await;
    let user_id = UserId::from("User-123");

    store
        .put_cart(CartRecord::empty(user_id.clone()), Some(Version::initial()))
        .await
        .unwrap();

    let version = store
        .put_cart(CartRecord::empty(user_id.clone()), None)
        .await
        .unwrap();
    assert_eq!(version, Version::new(2));
}

#[tokio::test]
#[serial]
async fn order_roundtrip_preserves_lines() {
    let store = get_test_store().await;

    store.append(test_order("AAAA1111")).await.unwrap();

    let loaded = store
        .get(&OrderId::new("AAAA1111"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.customer_info.email, "ada@example.com");
    assert_eq!(loaded.items.len(), 2);
    assert_eq!(loaded.items[0].subtotal.cents(), 1998);
    assert_eq!(loaded.items[1].subtotal.cents(), 450);
    assert_eq!(loaded.total.cents(), 2448);
}

#[tokio::test]
#[serial]
async fn duplicate_order_id_is_rejected() {
    let store = get_test_store().await;

    store.append(test_order("AAAA1111")).await.unwrap();
    let result = store.append(test_order("AAAA1111")).await;

    assert!(matches!(result, Err(StoreError::DuplicateOrderId(_))));
    assert_eq!(store.order_count().await.unwrap(), 1);
}
