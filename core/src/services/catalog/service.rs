//! Catalog service implementation.

use std::sync::Arc;

use tb_shared::types::pagination::{Page, PageRequest};

use crate::domain::entities::{NewAuditRecord, NewProduct, Product, ProductPatch};
use crate::errors::{MarketError, MarketResult};
use crate::repositories::{AuditRepository, ProductRepository};

/// Catalog service for listing management.
///
/// Update and delete are owner-only and blocked once a product has left the
/// `AVAILABLE` state; bookings alone move products between states. Every
/// mutation is mirrored into the audit trail.
pub struct CatalogService<P, A>
where
    P: ProductRepository,
    A: AuditRepository,
{
    products: Arc<P>,
    audit: Arc<A>,
}

impl<P, A> CatalogService<P, A>
where
    P: ProductRepository,
    A: AuditRepository,
{
    pub fn new(products: Arc<P>, audit: Arc<A>) -> Self {
        Self { products, audit }
    }

    /// Create a new listing owned by `owner_id`.
    pub async fn create_product(
        &self,
        owner_id: i64,
        input: NewProduct,
    ) -> MarketResult<Product> {
        let input = NewProduct { owner_id, ..input };
        let product = self.products.create(input).await?;

        tracing::info!(product_id = product.id, owner_id, "product created");
        self.audit
            .record(NewAuditRecord::created(
                owner_id, "Product", product.id, &product,
            ))
            .await?;

        Ok(product)
    }

    /// Fetch one product.
    pub async fn get_product(&self, id: i64) -> MarketResult<Product> {
        self.products
            .find_by_id(id)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))
    }

    /// Page through all listings, optionally keeping only products tagged
    /// with at least one of `categories`.
    pub async fn list_products(
        &self,
        categories: Option<Vec<String>>,
        page: PageRequest,
    ) -> MarketResult<Page<Product>> {
        let page = page.validate();
        let (items, total) = self.products.list(categories.as_deref(), page).await?;
        Ok(Page::new(items, page, total))
    }

    /// Page through one owner's listings.
    pub async fn list_products_by_owner(
        &self,
        owner_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Product>> {
        let page = page.validate();
        let (items, total) = self.products.list_by_owner(owner_id, page).await?;
        Ok(Page::new(items, page, total))
    }

    /// Apply a partial update to an `AVAILABLE` product owned by `actor_id`.
    pub async fn update_product(
        &self,
        id: i64,
        actor_id: i64,
        patch: ProductPatch,
    ) -> MarketResult<Product> {
        if patch.is_empty() {
            return Err(MarketError::validation("no fields to update"));
        }

        let mut product = self.get_product(id).await?;
        if !product.is_owned_by(actor_id) {
            return Err(MarketError::Forbidden);
        }
        if !product.is_available() {
            return Err(MarketError::invalid_state(
                "cannot update a sold or rented product",
            ));
        }

        let previous = product.clone();
        product.apply(patch);
        let stored = self
            .products
            .update(&product)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))?;

        tracing::info!(product_id = id, actor_id, "product updated");
        self.audit
            .record(NewAuditRecord::updated(
                actor_id, "Product", id, &previous, &stored,
            ))
            .await?;

        Ok(stored)
    }

    /// Delete an `AVAILABLE` product owned by `actor_id`.
    pub async fn delete_product(&self, id: i64, actor_id: i64) -> MarketResult<()> {
        let product = self.get_product(id).await?;
        if !product.is_owned_by(actor_id) {
            return Err(MarketError::Forbidden);
        }
        if !product.is_available() {
            return Err(MarketError::invalid_state(
                "cannot delete a sold or rented product",
            ));
        }

        if !self.products.delete(id).await? {
            return Err(MarketError::not_found("Product"));
        }

        tracing::info!(product_id = id, actor_id, "product deleted");
        self.audit
            .record(NewAuditRecord::deleted(actor_id, "Product", id, &product))
            .await?;

        Ok(())
    }

    /// Bump the view counter. Anyone may view; no ownership check.
    pub async fn increment_views(&self, id: i64) -> MarketResult<Product> {
        self.products
            .increment_views(id)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))
    }
}
