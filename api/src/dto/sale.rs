//! Purchase payloads.

use serde::Deserialize;

/// Body of `POST /api/v1/sales`.
#[derive(Debug, Deserialize)]
pub struct BuyProductRequest {
    pub product_id: i64,
}
