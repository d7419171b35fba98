//! Purchase booking: the single-winner buy workflow and sale history
//! queries.

mod service;

#[cfg(test)]
mod tests;

pub use service::SalesService;
