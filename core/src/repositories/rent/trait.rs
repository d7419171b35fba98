//! Rent repository trait for paging through rental history.
//!
//! Rent rows are written exclusively by the booking engine; this trait is
//! read-only by design.

use async_trait::async_trait;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::Rent;
use crate::errors::MarketResult;

/// Read-side contract for rental history queries, newest first.
#[async_trait]
pub trait RentRepository: Send + Sync {
    /// Rentals where the user is the renter (their borrows).
    async fn list_by_renter(
        &self,
        renter_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)>;

    /// Rentals where the user is the product owner (their lents).
    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)>;

    /// All rental windows booked against one product.
    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)>;
}
