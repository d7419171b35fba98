//! Sale entity: the single purchase a product can ever have.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A committed purchase. At most one exists per product, enforced by a
/// unique constraint on `product_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    pub buyer_id: i64,
    /// Product owner at purchase time
    pub seller_id: i64,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new sale row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub product_id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub price: Decimal,
}
