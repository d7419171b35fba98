//! Product repository trait defining the interface for catalog persistence.

use async_trait::async_trait;

use tb_shared::types::pagination::PageRequest;

use crate::domain::entities::{NewProduct, Product};
use crate::errors::MarketResult;

/// Repository contract for catalog reads and writes.
///
/// Booking operations never go through this trait; they run inside a
/// [`crate::booking::BookingTx`] so status flips stay atomic with the rent or
/// sale insert. This trait covers everything else the catalog needs.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch a product by id.
    async fn find_by_id(&self, id: i64) -> MarketResult<Option<Product>>;

    /// Insert a new product and return it with storage-assigned fields.
    async fn create(&self, product: NewProduct) -> MarketResult<Product>;

    /// Persist the mutable fields of an existing product.
    ///
    /// Returns the stored row, or `None` when the product vanished.
    async fn update(&self, product: &Product) -> MarketResult<Option<Product>>;

    /// Delete a product. Returns `false` when it did not exist.
    async fn delete(&self, id: i64) -> MarketResult<bool>;

    /// Atomically bump the view counter and return the updated product.
    ///
    /// The increment must happen in storage, not read-modify-write, so
    /// concurrent views are never lost.
    async fn increment_views(&self, id: i64) -> MarketResult<Option<Product>>;

    /// Page through all products, newest first, optionally keeping only
    /// products whose category tags overlap `categories`.
    async fn list(
        &self,
        categories: Option<&[String]>,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)>;

    /// Page through one owner's products, newest first.
    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)>;
}
