//! Rental price derivation.
//!
//! The per-period rate is normalized to a daily rate with fixed divisors
//! (7 for weekly, 30 for monthly rates). This is intentionally not
//! calendar-aware; the divisors are part of the pricing contract.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::entities::RentalPeriod;

const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;

/// Total price for renting at `rate` per `period` over `[start, end)`.
///
/// Callers must have validated `start < end`; the range check lives in the
/// booking engine, not here. The result is rounded to two decimal places,
/// half away from zero.
pub fn compute_rental_price(
    rate: Decimal,
    period: RentalPeriod,
    start: NaiveDate,
    end: NaiveDate,
) -> Decimal {
    let daily_rate = match period {
        RentalPeriod::Day => rate,
        RentalPeriod::Week => rate / Decimal::from(DAYS_PER_WEEK),
        RentalPeriod::Month => rate / Decimal::from(DAYS_PER_MONTH),
    };

    let days_rented = Decimal::from((end - start).num_days());
    (daily_rate * days_rented).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
