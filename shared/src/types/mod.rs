//! Shared type definitions used across layers.

pub mod pagination;
pub mod response;

pub use pagination::{Page, PageMeta, PageRequest};
pub use response::ErrorBody;
