use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

use tb_api::app::{self, AppState};
use tb_infra::{
    DatabasePool, PgAuditRepository, PgBookingStore, PgProductRepository, PgRentRepository,
    PgSaleRepository,
};
use tb_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env();

    let pool = DatabasePool::new(&config.database).await?;
    pool.health_check().await?;
    tracing::info!("database connection established");

    let products = Arc::new(PgProductRepository::new(pool.pool().clone()));
    let rents = Arc::new(PgRentRepository::new(pool.pool().clone()));
    let sales = Arc::new(PgSaleRepository::new(pool.pool().clone()));
    let audit = Arc::new(PgAuditRepository::new(
        pool.pool().clone(),
        config.audit_enabled,
    ));
    let booking = Arc::new(PgBookingStore::new(
        pool.pool().clone(),
        config.audit_enabled,
    ));

    let state = AppState::new(products, audit, booking, rents, sales);

    let bind_address = config.server.bind_address();
    tracing::info!(%bind_address, audit_enabled = config.audit_enabled, "starting tradebay api");

    let mut server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(state.clone()))
            .configure(
                app::configure::<
                    PgProductRepository,
                    PgAuditRepository,
                    PgBookingStore,
                    PgRentRepository,
                    PgSaleRepository,
                >,
            )
    });

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
