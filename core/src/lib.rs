//! # TradeBay Core
//!
//! Core business logic and domain layer for the TradeBay backend.
//! This crate contains the domain entities, the booking engine that keeps
//! rentals and sales race-safe, repository interfaces, the pricing
//! calculator, and the error taxonomy shared by the outer layers.

pub mod booking;
pub mod domain;
pub mod errors;
pub mod pricing;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use errors::{MarketError, MarketResult};
