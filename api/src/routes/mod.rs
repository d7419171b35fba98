//! HTTP route handlers, grouped by resource.

pub mod health;
pub mod products;
pub mod rents;
pub mod sales;
