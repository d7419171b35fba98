//! Application state and route wiring.

use std::sync::Arc;

use actix_web::web;

use tb_core::booking::BookingStore;
use tb_core::repositories::{AuditRepository, ProductRepository, RentRepository, SaleRepository};
use tb_core::services::{CatalogService, RentalService, SalesService};

use crate::routes;

/// Shared services handed to every handler.
pub struct AppState<P, A, B, R, S>
where
    P: ProductRepository,
    A: AuditRepository,
    B: BookingStore,
    R: RentRepository,
    S: SaleRepository,
{
    pub catalog: Arc<CatalogService<P, A>>,
    pub rentals: Arc<RentalService<B, R, P>>,
    pub sales: Arc<SalesService<B, S>>,
}

impl<P, A, B, R, S> AppState<P, A, B, R, S>
where
    P: ProductRepository,
    A: AuditRepository,
    B: BookingStore,
    R: RentRepository,
    S: SaleRepository,
{
    pub fn new(
        products: Arc<P>,
        audit: Arc<A>,
        booking: Arc<B>,
        rents: Arc<R>,
        sales: Arc<S>,
    ) -> Self {
        Self {
            catalog: Arc::new(CatalogService::new(Arc::clone(&products), audit)),
            rentals: Arc::new(RentalService::new(
                Arc::clone(&booking),
                rents,
                Arc::clone(&products),
            )),
            sales: Arc::new(SalesService::new(booking, sales)),
        }
    }
}

// Derived Clone would require Clone on the type parameters.
impl<P, A, B, R, S> Clone for AppState<P, A, B, R, S>
where
    P: ProductRepository,
    A: AuditRepository,
    B: BookingStore,
    R: RentRepository,
    S: SaleRepository,
{
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
            rentals: Arc::clone(&self.rentals),
            sales: Arc::clone(&self.sales),
        }
    }
}

/// Register the full route table.
///
/// `/products/mine` is registered before `/products/{id}` so the literal
/// segment wins.
pub fn configure<P, A, B, R, S>(cfg: &mut web::ServiceConfig)
where
    P: ProductRepository + 'static,
    A: AuditRepository + 'static,
    B: BookingStore + 'static,
    R: RentRepository + 'static,
    S: SaleRepository + 'static,
{
    cfg.route("/health", web::get().to(routes::health::health_check))
        .service(
            web::scope("/api/v1")
                .route(
                    "/products",
                    web::post().to(routes::products::create_product::<P, A, B, R, S>),
                )
                .route(
                    "/products",
                    web::get().to(routes::products::list_products::<P, A, B, R, S>),
                )
                .route(
                    "/products/mine",
                    web::get().to(routes::products::list_my_products::<P, A, B, R, S>),
                )
                .route(
                    "/products/{id}",
                    web::get().to(routes::products::get_product::<P, A, B, R, S>),
                )
                .route(
                    "/products/{id}",
                    web::patch().to(routes::products::update_product::<P, A, B, R, S>),
                )
                .route(
                    "/products/{id}",
                    web::delete().to(routes::products::delete_product::<P, A, B, R, S>),
                )
                .route(
                    "/products/{id}/rents",
                    web::get().to(routes::rents::list_product_rents::<P, A, B, R, S>),
                )
                .route(
                    "/rents",
                    web::post().to(routes::rents::create_rent::<P, A, B, R, S>),
                )
                .route(
                    "/sales",
                    web::post().to(routes::sales::buy_product::<P, A, B, R, S>),
                )
                .route(
                    "/users/{id}/borrows",
                    web::get().to(routes::rents::list_borrows::<P, A, B, R, S>),
                )
                .route(
                    "/users/{id}/lendings",
                    web::get().to(routes::rents::list_lendings::<P, A, B, R, S>),
                )
                .route(
                    "/users/{id}/purchases",
                    web::get().to(routes::sales::list_purchases::<P, A, B, R, S>),
                )
                .route(
                    "/users/{id}/sales",
                    web::get().to(routes::sales::list_sales::<P, A, B, R, S>),
                ),
        );
}
