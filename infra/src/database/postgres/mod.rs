//! PostgreSQL implementations of the core persistence interfaces.

mod audit_repository;
mod booking_store;
mod product_repository;
mod rent_repository;
mod rows;
mod sale_repository;

pub use audit_repository::PgAuditRepository;
pub use booking_store::PgBookingStore;
pub use product_repository::PgProductRepository;
pub use rent_repository::PgRentRepository;
pub use sale_repository::PgSaleRepository;

use tb_core::errors::MarketError;

/// Map a SQLx failure into the domain error taxonomy.
pub(crate) fn db_err(err: sqlx::Error) -> MarketError {
    MarketError::database(err.to_string())
}
