//! # TradeBay Shared
//!
//! Cross-layer types for the TradeBay backend: pagination, API response
//! shapes, and environment-driven configuration. This crate has no knowledge
//! of the domain model; everything here is reusable plumbing shared by the
//! core, infra, and api layers.

pub mod config;
pub mod types;
