//! Row-to-entity mapping shared by the repositories and the booking store.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::Row;

use tb_core::domain::entities::{Product, ProductStatus, Rent, RentalPeriod, Sale};
use tb_core::errors::{MarketError, MarketResult};

fn get<'r, T>(row: &'r PgRow, column: &str) -> MarketResult<T>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| MarketError::database(format!("failed to read column {column}: {e}")))
}

pub(crate) fn product_from_row(row: &PgRow) -> MarketResult<Product> {
    let status: String = get(row, "status")?;
    let status = ProductStatus::parse(&status)
        .ok_or_else(|| MarketError::database(format!("unknown product status: {status}")))?;

    let rental_period: String = get(row, "rental_period")?;
    let rental_period = RentalPeriod::parse(&rental_period)
        .ok_or_else(|| MarketError::database(format!("unknown rental period: {rental_period}")))?;

    Ok(Product {
        id: get(row, "id")?,
        title: get(row, "title")?,
        description: get(row, "description")?,
        categories: get::<Vec<String>>(row, "categories")?,
        purchase_price: get::<Decimal>(row, "purchase_price")?,
        rent_price: get::<Decimal>(row, "rent_price")?,
        rental_period,
        status,
        view_count: get(row, "view_count")?,
        owner_id: get(row, "owner_id")?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
        updated_at: get::<DateTime<Utc>>(row, "updated_at")?,
    })
}

pub(crate) fn rent_from_row(row: &PgRow) -> MarketResult<Rent> {
    Ok(Rent {
        id: get(row, "id")?,
        product_id: get(row, "product_id")?,
        renter_id: get(row, "renter_id")?,
        owner_id: get(row, "owner_id")?,
        rent_price: get::<Decimal>(row, "rent_price")?,
        start_date: get::<NaiveDate>(row, "start_date")?,
        end_date: get::<NaiveDate>(row, "end_date")?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
    })
}

pub(crate) fn sale_from_row(row: &PgRow) -> MarketResult<Sale> {
    Ok(Sale {
        id: get(row, "id")?,
        product_id: get(row, "product_id")?,
        buyer_id: get(row, "buyer_id")?,
        seller_id: get(row, "seller_id")?,
        price: get::<Decimal>(row, "price")?,
        created_at: get::<DateTime<Utc>>(row, "created_at")?,
    })
}
