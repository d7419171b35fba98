//! Product catalog: owner-scoped CRUD over listings.

mod service;

#[cfg(test)]
mod tests;

pub use service::CatalogService;
