use async_trait::async_trait;
use chrono::Utc;
use common::{Money, OrderId, ProductId, UserId};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{
    CartRecord, CustomerInfo, OrderRecord, Product, Result, StoreError, Version,
    cart::CartItem,
    order::OrderLine,
    store::{CartStore, CatalogStore, OrderStore},
};

/// PostgreSQL-backed storefront store.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    /// Adds a product to the catalog (seeding and tests).
    pub async fn insert_product(&self, product: Product) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, in_stock)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.in_stock)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    fn row_to_product(row: PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: Money::from_cents(row.try_get("price_cents")?),
            in_stock: row.try_get("in_stock")?,
        })
    }

    fn row_to_cart(row: PgRow) -> Result<CartRecord> {
        let items_json: serde_json::Value = row.try_get("items")?;
        let items: Vec<CartItem> = serde_json::from_value(items_json)?;

        Ok(CartRecord {
            user_id: UserId::from(row.try_get::<String, _>("user_id")?),
            items,
            total: Money::from_cents(row.try_get("total_cents")?),
            version: Version::new(row.try_get("version")?),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<OrderRecord> {
        let items_json: serde_json::Value = row.try_get("items")?;
        let items: Vec<OrderLine> = serde_json::from_value(items_json)?;

        Ok(OrderRecord {
            order_id: OrderId::new(row.try_get::<String, _>("order_id")?),
            customer_info: CustomerInfo {
                name: row.try_get("customer_name")?,
                email: row.try_get("customer_email")?,
            },
            items,
            total: Money::from_cents(row.try_get("total_cents")?),
            timestamp: row.try_get("created_at")?,
        })
    }
}

#[async_trait]
impl CatalogStore for PostgresStore {
    async fn list_in_stock(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, in_stock
            FROM products
            WHERE in_stock
            ORDER BY position ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn resolve(&self, product_id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price_cents, in_stock
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(product_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_product).transpose()
    }
}

#[async_trait]
impl CartStore for PostgresStore {
    async fn get_cart(&self, user_id: &UserId) -> Result<Option<CartRecord>> {
        let row = sqlx::query(
            r#"
            SELECT user_id, items, total_cents, version, created_at, updated_at
            FROM carts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_cart).transpose()
    }

    async fn put_cart(
        &self,
        cart: CartRecord,
        expected_version: Option<Version>,
    ) -> Result<Version> {
        // The row lock makes the version check and the write atomic per user.
        let mut tx = self.pool.begin().await?;

        let current: Option<i64> =
            sqlx::query_scalar("SELECT version FROM carts WHERE user_id = $1 FOR UPDATE")
                .bind(cart.user_id.as_str())
                .fetch_optional(&mut *tx)
                .await?;
        let actual = current.map(Version::new).unwrap_or_else(Version::initial);

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
        let items_json = serde_json::to_value(&cart.items)?;

        sqlx::query(
            r#"
            INSERT INTO carts (user_id, items, total_cents, version, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (user_id) DO UPDATE
            SET items = EXCLUDED.items,
                total_cents = EXCLUDED.total_cents,
                version = EXCLUDED.version,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(cart.user_id.as_str())
        .bind(items_json)
        .bind(cart.total.cents())
        .bind(new_version.as_i64())
        .bind(cart.created_at)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(new_version)
    }
}

#[async_trait]
impl OrderStore for PostgresStore {
    async fn append(&self, order: OrderRecord) -> Result<()> {
        let items_json = serde_json::to_value(&order.items)?;

        sqlx::query(
            r#"
            INSERT INTO orders (order_id, customer_name, customer_email, items, total_cents, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.order_id.as_str())
        .bind(&order.customer_info.name)
        .bind(&order.customer_info.email)
        .bind(items_json)
        .bind(order.total.cents())
        .bind(order.timestamp)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The primary key on order_id turns an overwrite attempt into a
            // typed rejection.
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.constraint() == Some("orders_pkey")
            {
                return StoreError::DuplicateOrderId(order.order_id.clone());
            }
            StoreError::Database(e)
        })?;

        Ok(())
    }

    async fn get(&self, order_id: &OrderId) -> Result<Option<OrderRecord>> {
        let row = sqlx::query(
            r#"
            SELECT order_id, customer_name, customer_email, items, total_cents, created_at
            FROM orders
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order).transpose()
    }

    async fn order_count(&self) -> Result<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;
        Ok(count as usize)
    }
}
