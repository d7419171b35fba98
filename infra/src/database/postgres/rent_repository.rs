//! PostgreSQL implementation of the RentRepository trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use tb_core::domain::entities::Rent;
use tb_core::errors::MarketResult;
use tb_core::repositories::RentRepository;
use tb_shared::types::pagination::PageRequest;

use super::rows::rent_from_row;
use super::db_err;

const RENT_COLUMNS: &str =
    "id, product_id, renter_id, owner_id, rent_price, start_date, end_date, created_at";

/// SQLx-backed rent history repository. Read-only: rent rows are written by
/// the booking store alone.
pub struct PgRentRepository {
    pool: PgPool,
}

impl PgRentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page_by_column(
        &self,
        column: &str,
        value: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        let query = format!(
            r#"
            SELECT {RENT_COLUMNS} FROM rents
            WHERE {column} = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query(&query)
            .bind(value)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let items = rows
            .iter()
            .map(rent_from_row)
            .collect::<MarketResult<Vec<_>>>()?;

        let count_query = format!("SELECT COUNT(*) AS total FROM rents WHERE {column} = $1");
        let total: i64 = sqlx::query(&count_query)
            .bind(value)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?
            .try_get("total")
            .map_err(db_err)?;

        Ok((items, total as u64))
    }
}

#[async_trait]
impl RentRepository for PgRentRepository {
    async fn list_by_renter(
        &self,
        renter_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        self.page_by_column("renter_id", renter_id, page).await
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        self.page_by_column("owner_id", owner_id, page).await
    }

    async fn list_by_product(
        &self,
        product_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Rent>, u64)> {
        self.page_by_column("product_id", product_id, page).await
    }
}
