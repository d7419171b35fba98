//! Rental booking: date-window validation, overlap detection, and rental
//! history queries.

mod service;


pub use service::{CreateRentInput, RentalService};
