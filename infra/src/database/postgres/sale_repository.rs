//! PostgreSQL implementation of the SaleRepository trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use tb_core::domain::entities::Sale;
use tb_core::errors::MarketResult;
use tb_core::repositories::SaleRepository;
use tb_shared::types::pagination::PageRequest;

use super::rows::sale_from_row;
use super::db_err;

const SALE_COLUMNS: &str = "id, product_id, buyer_id, seller_id, price, created_at";

/// SQLx-backed sale history repository. Read-only: sale rows are written by
/// the booking store alone.
pub struct PgSaleRepository {
    pool: PgPool,
}

impl PgSaleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn page_by_column(
        &self,
        column: &str,
        value: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)> {
        let query = format!(
            r#"
            SELECT {SALE_COLUMNS} FROM sales
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
            .map(sale_from_row)
            .collect::<MarketResult<Vec<_>>>()?;

        let count_query = format!("SELECT COUNT(*) AS total FROM sales WHERE {column} = $1");
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
impl SaleRepository for PgSaleRepository {
    async fn list_by_buyer(
        &self,
        buyer_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)> {
        self.page_by_column("buyer_id", buyer_id, page).await
    }

    async fn list_by_seller(
        &self,
        seller_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Sale>, u64)> {
        self.page_by_column("seller_id", seller_id, page).await
    }
}
