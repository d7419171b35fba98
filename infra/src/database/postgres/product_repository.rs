//! PostgreSQL implementation of the ProductRepository trait.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use tb_core::domain::entities::{NewProduct, Product};
use tb_core::errors::MarketResult;
use tb_core::repositories::ProductRepository;
use tb_shared::types::pagination::PageRequest;

use super::rows::product_from_row;
use super::db_err;

const PRODUCT_COLUMNS: &str = "id, title, description, categories, purchase_price, rent_price, \
                               rental_period, status, view_count, owner_id, created_at, updated_at";

/// SQLx-backed product repository.
pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_by_id(&self, id: i64) -> MarketResult<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn create(&self, product: NewProduct) -> MarketResult<Product> {
        let query = format!(
            r#"
            INSERT INTO products
                (title, description, categories, purchase_price, rent_price,
                 rental_period, status, view_count, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, 'AVAILABLE', 0, $7)
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(&product.title)
            .bind(&product.description)
            .bind(&product.categories)
            .bind(product.purchase_price)
            .bind(product.rent_price)
            .bind(product.rental_period.as_str())
            .bind(product.owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;
        product_from_row(&row)
    }

    async fn update(&self, product: &Product) -> MarketResult<Option<Product>> {
        let query = format!(
            r#"
            UPDATE products
            SET title = $2,
                description = $3,
                categories = $4,
                purchase_price = $5,
                rent_price = $6,
                rental_period = $7,
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(product.id)
            .bind(&product.title)
            .bind(&product.description)
            .bind(&product.categories)
            .bind(product.purchase_price)
            .bind(product.rent_price)
            .bind(product.rental_period.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn delete(&self, id: i64) -> MarketResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: i64) -> MarketResult<Option<Product>> {
        // The increment runs in storage so concurrent views are never lost.
        let query = format!(
            r#"
            UPDATE products
            SET view_count = view_count + 1
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        );
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        row.as_ref().map(product_from_row).transpose()
    }

    async fn list(
        &self,
        categories: Option<&[String]>,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE $1::text[] IS NULL OR categories && $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query(&query)
            .bind(categories)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let items = rows
            .iter()
            .map(product_from_row)
            .collect::<MarketResult<Vec<_>>>()?;

        let total: i64 = sqlx::query(
            "SELECT COUNT(*) AS total FROM products WHERE $1::text[] IS NULL OR categories && $1",
        )
        .bind(categories)
        .fetch_one(&self.pool)
        .await
        .map_err(db_err)?
        .try_get("total")
        .map_err(db_err)?;

        Ok((items, total as u64))
    }

    async fn list_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<(Vec<Product>, u64)> {
        let query = format!(
            r#"
            SELECT {PRODUCT_COLUMNS} FROM products
            WHERE owner_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            "#
        );
        let rows = sqlx::query(&query)
            .bind(owner_id)
            .bind(page.limit_i64())
            .bind(page.offset_i64())
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;
        let items = rows
            .iter()
            .map(product_from_row)
            .collect::<MarketResult<Vec<_>>>()?;

        let total: i64 = sqlx::query("SELECT COUNT(*) AS total FROM products WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?
            .try_get("total")
            .map_err(db_err)?;

        Ok((items, total as u64))
    }
}
