//! Order records.
//!
//! Orders are append-only: once written they are never updated or deleted.

use chrono::{DateTime, Utc};
use common::{Money, OrderId};
use serde::{Deserialize, Serialize};

/// Customer contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    pub name: String,
    pub email: String,
}

/// One line of a completed order.
///
/// A point-in-time snapshot of name and price, deliberately decoupled from
/// the live catalog so later price or catalog edits never rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub quantity: u32,
    #[serde(rename = "subtotal_cents")]
    pub subtotal: Money,
}

/// An immutable record of a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: OrderId,
    pub customer_info: CustomerInfo,
    pub items: Vec<OrderLine>,
    #[serde(rename = "total_cents")]
    pub total: Money,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_serialization_roundtrip() {
        let order = OrderRecord {
            order_id: OrderId::generate(),
            customer_info: CustomerInfo {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
            },
            items: vec![OrderLine {
                name: "Mug".to_string(),
                price: Money::from_cents(999),
                quantity: 2,
                subtotal: Money::from_cents(1998),
            }],
            total: Money::from_cents(1998),
            timestamp: Utc::now(),
        };

        let json = serde_json::to_string(&order).unwrap();
        let back: OrderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(order, back);
    }

    #[test]
    fn line_serializes_cents_fields() {
        let line = OrderLine {
            name: "Pen".to_string(),
            price: Money::from_cents(150),
            quantity: 3,
            subtotal: Money::from_cents(450),
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["price_cents"], 150);
        assert_eq!(json["subtotal_cents"], 450);
    }
}
