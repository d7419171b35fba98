//! # TradeBay Infrastructure
//!
//! PostgreSQL implementations of the core repository interfaces and the
//! booking store. All locking the booking engine relies on lives here:
//! transaction-scoped advisory locks for purchases and `FOR UPDATE` row
//! locks for rental bookings.

pub mod database;

use thiserror::Error;

/// Infrastructure-level failures that occur before a domain operation runs
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub use database::connection::DatabasePool;
pub use database::postgres::{
    PgAuditRepository, PgBookingStore, PgProductRepository, PgRentRepository, PgSaleRepository,
};
