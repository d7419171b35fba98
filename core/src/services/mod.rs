//! Business services containing domain logic and use cases.

pub mod catalog;
pub mod rental;
pub mod sales;

// Re-export commonly used types
pub use catalog::CatalogService;
pub use rental::{CreateRentInput, RentalService};
pub use sales::SalesService;
