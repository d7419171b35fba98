//! Rental booking and rental history endpoints.

use actix_web::{web, HttpResponse};

use tb_core::booking::BookingStore;
use tb_core::repositories::{AuditRepository, ProductRepository, RentRepository, SaleRepository};
use tb_shared::types::pagination::PageRequest;

use crate::app::AppState;
use crate::dto::CreateRentRequest;
use crate::error::ApiError;
use crate::identity::CurrentUser;

/// Handler for POST /api/v1/rents.
///
/// Books a rental window for the caller. Returns 201 with the stored rent,
/// including the computed total price.
pub async fn create_rent<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    body: web::Json<CreateRentRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let rent = state
        .rentals
        .create_rent(user.id, body.into_inner().into_input())
        .await?;
    Ok(HttpResponse::Created().json(rent))
}

/// Handler for GET /api/v1/users/{id}/borrows.
///
/// Rentals the user booked as renter. Callers may only read their own
/// history.
pub async fn list_borrows<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
    query: web::Query<PageRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let page = state
        .rentals
        .get_borrows_by_user(path.into_inner(), user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/users/{id}/lendings.
pub async fn list_lendings<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
    query: web::Query<PageRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let page = state
        .rentals
        .get_lent_by_user(path.into_inner(), user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/products/{id}/rents.
///
/// Booked windows of one product, visible to its owner only.
pub async fn list_product_rents<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
    query: web::Query<PageRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let page = state
        .rentals
        .get_rents_by_product(path.into_inner(), user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}
