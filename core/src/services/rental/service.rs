//! Rental service implementation.

use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use tb_shared::types::pagination::{Page, PageRequest};

use crate::booking::{BookingStore, BookingTx};
use crate::domain::entities::{NewAuditRecord, NewRent, ProductStatus, Rent};
use crate::errors::{MarketError, MarketResult};
use crate::pricing;
use crate::repositories::{ProductRepository, RentRepository};

/// Input for booking a rental window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRentInput {
    pub product_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Rental booking and history service.
///
/// `create_rent` runs entirely inside one booking transaction: the product
/// row is locked for the duration of the overlap check and the insert, so
/// two concurrent bookings of the same product are serialized by the
/// database and the second sees the first's committed window.
pub struct RentalService<B, R, P>
where
    B: BookingStore,
    R: RentRepository,
    P: ProductRepository,
{
    booking: Arc<B>,
    rents: Arc<R>,
    products: Arc<P>,
}

impl<B, R, P> RentalService<B, R, P>
where
    B: BookingStore,
    R: RentRepository,
    P: ProductRepository,
{
    pub fn new(booking: Arc<B>, rents: Arc<R>, products: Arc<P>) -> Self {
        Self {
            booking,
            rents,
            products,
        }
    }

    /// Book a rental window for `renter_id`.
    ///
    /// Preconditions are checked in a fixed order so each failure maps to a
    /// distinct error kind; the first violation aborts before any write.
    pub async fn create_rent(
        &self,
        renter_id: i64,
        input: CreateRentInput,
    ) -> MarketResult<Rent> {
        let mut tx = self.booking.begin().await?;
        match Self::execute_rent(tx.as_mut(), renter_id, &input).await {
            Ok(rent) => {
                tx.commit().await?;
                tracing::info!(
                    rent_id = rent.id,
                    product_id = rent.product_id,
                    renter_id,
                    "rental booked"
                );
                Ok(rent)
            }
            Err(err) => {
                let _ = tx.rollback().await;
                Err(err)
            }
        }
    }

    async fn execute_rent(
        tx: &mut dyn BookingTx,
        renter_id: i64,
        input: &CreateRentInput,
    ) -> MarketResult<Rent> {
        let product = tx
            .product_for_update(input.product_id)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))?;

        if product.is_sold() {
            return Err(MarketError::ProductUnavailable);
        }
        if product.is_owned_by(renter_id) {
            return Err(MarketError::ForbiddenSelfTransaction);
        }

        let today = Local::now().date_naive();
        if input.start_date < today {
            return Err(MarketError::DateInPast);
        }
        if input.start_date >= input.end_date {
            return Err(MarketError::InvalidDateRange);
        }

        if tx
            .find_overlapping_rent(product.id, input.start_date, input.end_date)
            .await?
            .is_some()
        {
            return Err(MarketError::DateRangeConflict);
        }

        if !tx.user_exists(renter_id).await? {
            return Err(MarketError::not_found("User"));
        }

        let total = pricing::compute_rental_price(
            product.rent_price,
            product.rental_period,
            input.start_date,
            input.end_date,
        );

        let rent = tx
            .insert_rent(NewRent {
                product_id: product.id,
                renter_id,
                owner_id: product.owner_id,
                rent_price: total,
                start_date: input.start_date,
                end_date: input.end_date,
            })
            .await?;
        tx.update_product_status(product.id, ProductStatus::Rented)
            .await?;
        tx.insert_audit(NewAuditRecord::created(renter_id, "Rent", rent.id, &rent))
            .await?;

        Ok(rent)
    }

    /// Rentals the user booked as renter. Own history only.
    pub async fn get_borrows_by_user(
        &self,
        user_id: i64,
        current_user_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Rent>> {
        if user_id != current_user_id {
            return Err(MarketError::Forbidden);
        }
        let page = page.validate();
        let (items, total) = self.rents.list_by_renter(user_id, page).await?;
        Ok(Page::new(items, page, total))
    }

    /// Rentals of products the user owns. Own history only.
    pub async fn get_lent_by_user(
        &self,
        user_id: i64,
        current_user_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Rent>> {
        if user_id != current_user_id {
            return Err(MarketError::Forbidden);
        }
        let page = page.validate();
        let (items, total) = self.rents.list_by_owner(user_id, page).await?;
        Ok(Page::new(items, page, total))
    }

    /// Rental windows booked against one product; restricted to its owner.
    pub async fn get_rents_by_product(
        &self,
        product_id: i64,
        current_user_id: i64,
        page: PageRequest,
    ) -> MarketResult<Page<Rent>> {
        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or_else(|| MarketError::not_found("Product"))?;
        if !product.is_owned_by(current_user_id) {
            return Err(MarketError::Forbidden);
        }
        let page = page.validate();
        let (items, total) = self.rents.list_by_product(product_id, page).await?;
        Ok(Page::new(items, page, total))
    }
}
