//! Booking unit of work.
//!
//! A booking (rent or sale) is a check-then-write sequence that must be
//! serialized per product across every server instance. All exclusivity is
//! therefore delegated to the database: [`BookingTx`] models one database
//! transaction, and its lock methods map onto the database's advisory and
//! row locks. The services in [`crate::services`] drive the sequence;
//! nothing outside them may flip a product's status.
//!
//! Atomicity contract: every write made through a [`BookingTx`] becomes
//! visible only on [`BookingTx::commit`]. On error the caller rolls back and
//! no partial state survives, including the audit row.

pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{
    NewAuditRecord, NewRent, NewSale, Product, ProductStatus, Rent, Sale,
};
use crate::errors::MarketResult;

pub use mock::MockBookingStore;

/// Factory for booking transactions.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Open a new transaction. Dropping the handle without committing must
    /// roll it back.
    async fn begin(&self) -> MarketResult<Box<dyn BookingTx>>;
}

/// One in-flight booking transaction.
///
/// Reads performed through this handle see the transaction's own writes and
/// are shielded from concurrent commits on the locked product.
#[async_trait]
pub trait BookingTx: Send {
    /// Try to take the transaction-scoped exclusive lock for a product.
    ///
    /// Non-blocking: returns `false` immediately when another transaction
    /// holds the lock. The lock is released at commit or rollback, never
    /// earlier.
    async fn try_lock_product(&mut self, product_id: i64) -> MarketResult<bool>;

    /// Fetch a product with its row locked for the rest of the transaction.
    async fn product_for_update(&mut self, product_id: i64) -> MarketResult<Option<Product>>;

    /// Any existing rent of `product_id` whose `[start, end)` window
    /// intersects the given one. Touching boundaries do not count.
    async fn find_overlapping_rent(
        &mut self,
        product_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MarketResult<Option<Rent>>;

    /// Whether a user row with this id exists.
    async fn user_exists(&mut self, user_id: i64) -> MarketResult<bool>;

    /// Insert a rent row, returning it with storage-assigned fields.
    async fn insert_rent(&mut self, rent: NewRent) -> MarketResult<Rent>;

    /// Insert a sale row, returning it with storage-assigned fields.
    async fn insert_sale(&mut self, sale: NewSale) -> MarketResult<Sale>;

    /// Flip the product status.
    async fn update_product_status(
        &mut self,
        product_id: i64,
        status: ProductStatus,
    ) -> MarketResult<()>;

    /// Append an audit record inside this transaction.
    async fn insert_audit(&mut self, entry: NewAuditRecord) -> MarketResult<()>;

    /// Make all writes visible and release held locks.
    async fn commit(self: Box<Self>) -> MarketResult<()>;

    /// Discard all writes and release held locks.
    async fn rollback(self: Box<Self>) -> MarketResult<()>;
}
