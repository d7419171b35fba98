//! Rent entity: one booked rental window of a product.
//!
//! Rents form an append-only ledger; rows are never mutated or deleted after
//! the booking engine commits them.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A committed rental booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rent {
    pub id: i64,
    pub product_id: i64,
    pub renter_id: i64,
    /// Product owner at booking time, copied so later transfers cannot
    /// rewrite rental history
    pub owner_id: i64,
    /// Total price for the whole window, already derived from the product's
    /// per-period rate
    pub rent_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Rent {
    /// Half-open interval intersection: `[start, end)` windows that merely
    /// touch at a boundary do not overlap.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.start_date < end && self.end_date > start
    }
}

/// Payload for inserting a new rent row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRent {
    pub product_id: i64,
    pub renter_id: i64,
    pub owner_id: i64,
    pub rent_price: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn rent(start: &str, end: &str) -> Rent {
        Rent {
            id: 1,
            product_id: 1,
            renter_id: 2,
            owner_id: 3,
            rent_price: Decimal::new(1000, 2),
            start_date: date(start),
            end_date: date(end),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn overlapping_windows_are_detected_symmetrically() {
        let existing = rent("2030-01-10", "2030-01-20");
        // straddles the start
        assert!(existing.overlaps(date("2030-01-05"), date("2030-01-11")));
        // straddles the end
        assert!(existing.overlaps(date("2030-01-19"), date("2030-01-25")));
        // fully contained
        assert!(existing.overlaps(date("2030-01-12"), date("2030-01-15")));
        // fully containing
        assert!(existing.overlaps(date("2030-01-01"), date("2030-02-01")));
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        let existing = rent("2030-01-10", "2030-01-20");
        assert!(!existing.overlaps(date("2030-01-20"), date("2030-01-25")));
        assert!(!existing.overlaps(date("2030-01-01"), date("2030-01-10")));
    }

    #[test]
    fn disjoint_windows_do_not_overlap() {
        let existing = rent("2030-01-10", "2030-01-20");
        assert!(!existing.overlaps(date("2030-02-01"), date("2030-02-05")));
    }
}
