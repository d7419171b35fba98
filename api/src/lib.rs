//! HTTP layer of the TradeBay backend.
//!
//! Thin actix-web surface over the services in `tb_core`: handlers decode
//! and validate the request, call one service method and encode the result.
//! No business rule lives here.

pub mod app;
pub mod dto;
pub mod error;
pub mod identity;
pub mod routes;

pub use app::AppState;
pub use error::ApiError;
pub use identity::CurrentUser;
