//! Catalog product records.

use common::{Money, ProductId};
use serde::{Deserialize, Serialize};

/// A purchasable product.
///
/// Catalog records are read-only from the cart and checkout engines'
/// perspective; prices are non-negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub in_stock: bool,
}

impl Product {
    /// Creates a product with a fresh random id.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Money,
        in_stock: bool,
    ) -> Self {
        Self {
            id: ProductId::new(),
            name: name.into(),
            description: description.into(),
            price,
            in_stock,
        }
    }
}
