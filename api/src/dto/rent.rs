//! Rental booking payloads.

use chrono::NaiveDate;
use serde::Deserialize;

use tb_core::services::rental::CreateRentInput;

/// Body of `POST /api/v1/rents`.
#[derive(Debug, Deserialize)]
pub struct CreateRentRequest {
    pub product_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl CreateRentRequest {
    pub fn into_input(self) -> CreateRentInput {
        CreateRentInput {
            product_id: self.product_id,
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}
