//! Request and response payloads.

pub mod product;
pub mod rent;
pub mod sale;

pub use product::{CreateProductRequest, ListProductsQuery, UpdateProductRequest};
pub use rent::CreateRentRequest;
pub use sale::BuyProductRequest;
