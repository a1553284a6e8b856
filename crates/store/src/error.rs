use common::{OrderId, UserId};
use thiserror::Error;

use crate::cart::Version;

/// Errors that can occur when interacting with the storefront stores.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A cart write lost the optimistic-concurrency race.
    /// The expected version did not match the persisted version.
    #[error("Version conflict for cart {user_id}: expected version {expected}, found {actual}")]
    VersionConflict {
        user_id: UserId,
        expected: Version,
        actual: Version,
    },

    /// An order with this id already exists. Orders are never overwritten.
    #[error("Order id already exists: {0}")]
    DuplicateOrderId(OrderId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
