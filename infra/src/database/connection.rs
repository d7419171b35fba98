//! Database connection pool management.
//!
//! Connection pooling over SQLx with PostgreSQL, configured from
//! [`DatabaseConfig`] with health checking for startup probes.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};

use tb_shared::config::DatabaseConfig;

use crate::InfrastructureError;

/// PostgreSQL connection pool wrapper.
#[derive(Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new connection pool from configuration.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        tracing::info!(
            max_connections = config.max_connections,
            "creating database connection pool"
        );

        let connect_options = PgConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("invalid database URL: {e}")))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(Duration::from_secs(config.idle_timeout))
            .max_lifetime(Duration::from_secs(config.max_lifetime))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| InfrastructureError::Database(format!("failed to connect: {e}")))?;

        Ok(Self { pool })
    }

    /// Verify the database answers a trivial query.
    pub async fn health_check(&self) -> Result<(), InfrastructureError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| InfrastructureError::Database(format!("health check failed: {e}")))
    }

    /// Access the underlying SQLx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
