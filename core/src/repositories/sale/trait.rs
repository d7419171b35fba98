//! Sale repository trait for paging through purchase history.
//!
//! Sale rows are written exclusively by the booking engine; this trait is
//! read-only by design.

use async_trait::async_trait;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::Sale;
use crate::errors::MarketResult;

/// Read-side contract for purchase history queries, newest first.
#[async_trait]
pub trait SaleRepository: Send + Sync {
    /// Purchases where the user is the buyer.
    async fn list_by_buyer(
        &self,
        buyer_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)>;

    /// Purchases where the user is the seller.
    async fn list_by_seller(
        &self,
        seller_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)>;
}
