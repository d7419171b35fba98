//! Plain data structs for the persisted entities.
//!
//! These carry no persistence machinery; repositories and the booking store
//! take them by value or reference with an explicit transaction boundary.

pub mod audit;
pub mod product;
pub mod rent;
pub mod sale;

pub use audit::{AuditAction, AuditRecord, NewAuditRecord};
pub use product::{NewProduct, Product, ProductPatch, ProductStatus, RentalPeriod};
pub use rent::{NewRent, Rent};
pub use sale::{NewSale, Sale};
