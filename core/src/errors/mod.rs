//! Domain-specific error types and error handling.
//!
//! Every business-rule violation surfaces as a [`MarketError`] variant; the
//! HTTP layer maps each kind to a stable status code and machine-readable
//! error code. Nothing in this crate panics on a business failure.

use thiserror::Error;

/// Core domain errors for catalog, rental, and sale operations
#[derive(Error, Debug)]
pub enum MarketError {
    /// A referenced product/user/rent/sale does not exist
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Product is sold, locked by a concurrent buyer, or otherwise not open
    /// for the requested booking
    #[error("Product is not available")]
    ProductUnavailable,

    /// The actor is both the owner and the counterparty of the transaction
    #[error("You cannot rent or buy your own product")]
    ForbiddenSelfTransaction,

    /// The actor requested another user's private history
    #[error("You can only view your own transactions")]
    Forbidden,

    /// Rental start date lies before today
    #[error("Rent start date cannot be in the past")]
    DateInPast,

    /// Rental end date does not lie strictly after the start date
    #[error("End date must be after start date")]
    InvalidDateRange,

    /// The requested rental window overlaps an existing one
    #[error("Product is already rented during the requested period")]
    DateRangeConflict,

    /// Operation not allowed in the product's current status
    #[error("Invalid state: {message}")]
    InvalidState { message: String },

    /// Malformed input, rejected before any business check
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Underlying storage failure
    #[error("Database error: {message}")]
    Database { message: String },
}

impl MarketError {
    /// Shorthand for a [`MarketError::NotFound`] on a named resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Shorthand for an [`MarketError::InvalidState`] failure.
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Shorthand for a [`MarketError::Validation`] failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`MarketError::Database`] failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }
}

pub type MarketResult<T> = Result<T, MarketError>;
