//! Sales service implementation.

use std::sync::Arc;

use tb_shared::types::pagination::{Page, PageRequest};

use crate::booking::{BookingStore, BookingTx};
use crate::domain::entities::{NewAuditRecord, NewSale, ProductStatus, Sale};
use crate::errors::{MarketError, MarketResult};
use crate::repositories::SaleRepository;

/// Purchase and sale history service.
///
/// A purchase is a strict single-winner race: the transaction-scoped
/// advisory lock on the product id makes exactly one of N concurrent buyers
/// proceed, and everyone else fails fast with `ProductUnavailable` instead
/// of queueing on the row.
pub struct SalesService<B, S>
where
    B: BookingStore,
    S: SaleRepository,
{
    booking: Arc<B>,
    sales: Arc<S>,
}

impl<B, S> SalesService<B, S>
where
    B: BookingStore,
    S: SaleRepository,
{
    pub fn new(booking: Arc<B>, sales: Arc<S>) -> Self {
        Self { booking, sales }
    }

    /// Buy a product outright for `buyer_id`.
    pub async fn buy_product(&self, buyer_id: i64, product_id: i64) -> MarketResult<Sale> {
        let mut tx = self.booking.begin().await?;
        match Self::execute_purchase(tx.as_mut(), buyer_id, product_id).await {
            Ok(sale) => {
                tx.commit().await?;
                tracing::info!(sale_id = sale.id, product_id, buyer_id, "product sold");
                Ok(sale)
            }
            Err(err) => {
                let _ = tx.rollback().await;
                Err(err)
            }
        }
    }

    async fn execute_purchase(
        tx: &mut dyn BookingTx,
        buyer_id: i64,
        product_id: i64,
    ) -> MarketResult<Sale> {
        // Non-blocking: a held lock means another buyer is mid-purchase.
        if !tx.try_lock_product(product_id).await? {
            tracing::debug!(product_id, buyer_id, "purchase lock contended");
            return Err(MarketError::ProductUnavailable);
        }

        let product = tx
            .product_for_update(product_id)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))?;

        if !tx.user_exists(buyer_id).await? {
            return Err(MarketError::not_found("User"));
        }
        if product.status != ProductStatus::Available {
            return Err(MarketError::ProductUnavailable);
        }
        if product.is_owned_by(buyer_id) {
            return Err(MarketError::ForbiddenSelfTransaction);
        }

        let sale = tx
            .insert_sale(NewSale {
                product_id: product.id,
                buyer_id,
                seller_id: product.owner_id,
                price: product.purchase_price,
            })
            .await?;
        tx.update_product_status(product.id, ProductStatus::Sold)
            .await?;
        tx.insert_audit(NewAuditRecord::created(buyer_id, "Sale", sale.id, &sale))
            .await?;

        Ok(sale)
    }

    /// Purchases the user made as buyer. Own history only.
    pub async fn get_bought_by_user(
        &self,
        user_id: i64,
        current_user_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Sale>> {
        if user_id != current_user_id {
            return Err(MarketError::Forbidden);
        }
        let page = page.validate();
        let (items, total) = self.sales.list_by_buyer(user_id, page).await?;
        Ok(Page::new(items, page, total))
    }

    /// Sales of the user's products. Own history only.
    pub async fn get_sold_by_user(
        &self,
        user_id: i64,
        current_user_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Sale>> {
        if user_id != current_user_id {
            return Err(MarketError::Forbidden);
        }
        let page = page.validate();
        let (items, total) = self.sales.list_by_seller(user_id, page).await?;
        Ok(Page::new(items, page, total))
    }
}
