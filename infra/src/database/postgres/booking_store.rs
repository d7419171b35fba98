//! PostgreSQL booking transaction.
//!
//! Implements the booking unit of work over one `sqlx` transaction. Both
//! exclusivity mechanisms live here: `pg_try_advisory_xact_lock` for the
//! purchase fast-fail path and `SELECT ... FOR UPDATE` for the rent path.
//! Postgres releases either lock automatically when the transaction ends.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Row, Transaction};

use tb_core::booking::{BookingStore, BookingTx};
use tb_core::domain::entities::{
    NewAuditRecord, NewRent, NewSale, Product, ProductStatus, Rent, Sale,
};
use tb_core::errors::{MarketError, MarketResult};

use super::audit_repository::INSERT_AUDIT;
use super::rows::{product_from_row, rent_from_row};
use super::db_err;

const PRODUCT_COLUMNS: &str = "id, title, description, categories, purchase_price, rent_price, \
                               rental_period, status, view_count, owner_id, created_at, updated_at";

/// Opens booking transactions on a shared pool.
pub struct PgBookingStore {
    pool: PgPool,
    audit_enabled: bool,
}

impl PgBookingStore {
    pub fn new(pool: PgPool, audit_enabled: bool) -> Self {
        Self {
            pool,
            audit_enabled,
        }
    }
}

#[async_trait]
impl BookingStore for PgBookingStore {
    async fn begin(&self) -> MarketResult<Box<dyn BookingTx>> {
        let tx = self.pool.begin().await.map_err(db_err)?;
        Ok(Box::new(PgBookingTx {
            tx,
            audit_enabled: self.audit_enabled,
        }))
    }
}

/// One open database transaction. Dropping it without an explicit commit
/// rolls back via sqlx.
pub struct PgBookingTx {
    tx: Transaction<'static, Postgres>,
    audit_enabled: bool,
}

#[async_trait]
impl BookingTx for PgBookingTx {
    async fn try_lock_product(&mut self, product_id: i64) -> MarketResult<bool> {
        let row = sqlx::query("SELECT pg_try_advisory_xact_lock($1) AS acquired")
            .bind(product_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_err)?;
        row.try_get("acquired").map_err(db_err)
    }

    async fn product_for_update(&mut self, product_id: i64) -> MarketResult<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE");
        let row = sqlx::query(&query)
            .bind(product_id)
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(db_err)?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn find_overlapping_rent(
        &mut self,
        product_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> MarketResult<Option<Rent>> {
        // Half-open interval overlap: touching boundaries do not conflict.
        let row = sqlx::query(
            r#"
            SELECT id, product_id, renter_id, owner_id, rent_price, start_date, end_date, created_at
            FROM rents
            WHERE product_id = $1 AND start_date < $3 AND end_date > $2
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .bind(start)
        .bind(end)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(db_err)?;
        row.as_ref().map(rent_from_row).transpose()
    }

    async fn user_exists(&mut self, user_id: i64) -> MarketResult<bool> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1) AS present")
            .bind(user_id)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(db_err)?;
        row.try_get("present").map_err(db_err)
    }

    async fn insert_rent(&mut self, rent: NewRent) -> MarketResult<Rent> {
        let row = sqlx::query(
            r#"
            INSERT INTO rents (product_id, renter_id, owner_id, rent_price, start_date, end_date)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_id, renter_id, owner_id, rent_price, start_date, end_date, created_at
            "#,
        )
        .bind(rent.product_id)
        .bind(rent.renter_id)
        .bind(rent.owner_id)
        .bind(rent.rent_price)
        .bind(rent.start_date)
        .bind(rent.end_date)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_err)?;
        rent_from_row(&row)
    }

    async fn insert_sale(&mut self, sale: NewSale) -> MarketResult<Sale> {
        let row = sqlx::query(
            r#"
            INSERT INTO sales (product_id, buyer_id, seller_id, price)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, buyer_id, seller_id, price, created_at
            "#,
        )
        .bind(sale.product_id)
        .bind(sale.buyer_id)
        .bind(sale.seller_id)
        .bind(sale.price)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(db_err)?;
        super::rows::sale_from_row(&row)
    }

    async fn update_product_status(
        &mut self,
        product_id: i64,
        status: ProductStatus,
    ) -> MarketResult<()> {
        let result = sqlx::query(
            "UPDATE products SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(product_id)
        .bind(status.as_str())
        .execute(&mut *self.tx)
        .await
        .map_err(db_err)?;
        if result.rows_affected() == 0 {
            return Err(MarketError::not_found("Product"));
        }
        Ok(())
    }

    async fn insert_audit(&mut self, entry: NewAuditRecord) -> MarketResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        sqlx::query(INSERT_AUDIT)
            .bind(entry.actor_id)
            .bind(&entry.entity_name)
            .bind(entry.entity_id)
            .bind(entry.action.as_str())
            .bind(&entry.previous_state)
            .bind(&entry.current_state)
            .execute(&mut *self.tx)
            .await
            .map_err(db_err)?;
        Ok(())
    }

    async fn commit(self: Box<Self>) -> MarketResult<()> {
        self.tx.commit().await.map_err(db_err)
    }

    async fn rollback(self: Box<Self>) -> MarketResult<()> {
        self.tx.rollback().await.map_err(db_err)
    }
}
