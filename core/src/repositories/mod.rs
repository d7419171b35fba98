//! Repository interfaces for entity persistence.
//!
//! Each submodule pairs a trait with an in-memory mock used by service and
//! API tests. Concrete PostgreSQL implementations live in the infra crate.

pub mod audit;
pub mod product;
pub mod rent;
pub mod sale;

pub use audit::{AuditRepository, MockAuditRepository};
pub use product::{MockProductRepository, ProductRepository};
pub use rent::{MockRentRepository, RentRepository};
pub use sale::{MockSaleRepository, SaleRepository};
