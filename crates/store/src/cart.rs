//! Persisted cart records and the version token guarding their writes.

use chrono::{DateTime, Utc};
use common::{CartItemId, Money, ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Version number for a persisted cart, used for optimistic concurrency
/// control.
///
/// `initial()` (0) means no cart has been persisted for the user yet; the
/// first write stores version 1 and each subsequent write increments by 1.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Version(i64);

impl Version {
    /// Creates a version from a raw value.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the initial version (0) for a cart that is not persisted yet.
    pub fn initial() -> Self {
        Self(0)
    }

    /// Returns the first persisted version (1).
    pub fn first() -> Self {
        Self(1)
    }

    /// Returns the next version.
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// Returns the raw version value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Version {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Version> for i64 {
    fn from(version: Version) -> Self {
        version.0
    }
}

/// One line of a cart: a product reference and a quantity.
///
/// The product id is a lookup key into the catalog, not an owning pointer;
/// prices are resolved at read time. Quantity is at least 1 for as long as
/// the line exists — a quantity update below 1 removes the line instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart line with a fresh id.
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            id: CartItemId::new(),
            product_id,
            quantity,
        }
    }
}

/// The persisted cart for one user.
///
/// `total` is derived from the items; the cart engine recomputes it from
/// current catalog prices on every mutation before the record is written, so
/// a stored total is never inconsistent with the stored items. It is kept in
/// the record so reads stay a single round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRecord {
    pub user_id: UserId,
    pub items: Vec<CartItem>,
    #[serde(rename = "total_cents")]
    pub total: Money,
    pub version: Version,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartRecord {
    /// A fresh empty cart at `Version::initial()`, not yet persisted.
    pub fn empty(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            items: Vec::new(),
            total: Money::zero(),
            version: Version::initial(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Finds the line holding the given product, if any.
    pub fn line_for_product(&mut self, product_id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product_id == product_id)
    }

    /// Index of the line with the given id, if any.
    pub fn position_of(&self, item_id: CartItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id == item_id)
    }
}
