//! Product catalog endpoints.

use actix_web::{web, HttpResponse};

use tb_core::booking::BookingStore;
use tb_core::repositories::{AuditRepository, ProductRepository, RentRepository, SaleRepository};
use tb_shared::types::pagination::PageRequest;

use crate::app::AppState;
use crate::dto::{CreateProductRequest, ListProductsQuery, UpdateProductRequest};
use crate::error::ApiError;
use crate::identity::CurrentUser;

/// Handler for POST /api/v1/products.
///
/// Lists a new product owned by the caller. Returns 201 with the stored
/// product.
pub async fn create_product<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let input = body.into_inner().into_new_product()?;
    let product = state.catalog.create_product(user.id, input).await?;
    Ok(HttpResponse::Created().json(product))
}

/// Handler for GET /api/v1/products.
///
/// Public listing page, optionally filtered by `categories` (comma
/// separated).
pub async fn list_products<P, A, B, R, S>(
    state: web::Data<AppState<P, A, B, R, S>>,
    query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let categories = query.categories();
    let page = state
        .catalog
        .list_products(categories, query.page_request())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/products/mine.
pub async fn list_my_products<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
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
        .catalog
        .list_products_by_owner(user.id, query.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Handler for GET /api/v1/products/{id}.
///
/// Each fetch counts as one view.
pub async fn get_product<P, A, B, R, S>(
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let product = state.catalog.increment_views(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Handler for PATCH /api/v1/products/{id}.
pub async fn update_product<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    let patch = body.into_inner().into_patch()?;
    let product = state
        .catalog
        .update_product(path.into_inner(), user.id, patch)
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Handler for DELETE /api/v1/products/{id}.
pub async fn delete_product<P, A, B, R, S>(
    user: CurrentUser,
    state: web::Data<AppState<P, A, B, R, S>>,
    path: web::Path<i64>,
) -> Result<HttpResponse, ApiError>
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    state
        .catalog
        .delete_product(path.into_inner(), user.id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}
