//! Purchase and sale history endpoints.

use actix_web::{web, HttpResponse};

use tb_core::booking::BookingStore;
use tb_core::repositories::{AuditRepository, ProductRepository, RentRepository, SaleRepository};
use tb_shared::types::pagination::PageRequest;

use crate::app::AppState;
use crate::dto::BuyProductRequest;
use crate::error::ApiError;
use crate::identity::CurrentUser;

/// Handler for POST /api/v1/sales.
///
/// Buys a product outright for the caller. At most one request per product
/// can ever succeed; concurrent buyers get `PRODUCT_UNAVAILABLE`.
pub async fn buy_product<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    body: web::Json<BuyProductRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let sale = state.sales.buy_product(user.id, body.product_id).await?;
    Ok(HttpResponse::Created().json(sale))
}

/// Handler for GET /api/v1/users/{id}/purchases.
pub async fn list_purchases<P, A, B, R, S>(
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
        .sales
        .get_bought_by_user(path.into_inner(), user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/users/{id}/sales.
pub async fn list_sales<P, A, B, R, S>(
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
        .sales
        .get_sold_by_user(path.into_inner(), user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}
