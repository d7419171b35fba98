//! Database connection management and PostgreSQL repository implementations.

pub mod connection;
pub mod postgres;
