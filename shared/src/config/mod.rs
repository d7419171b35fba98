//! Configuration loaded from environment variables.
//!
//! - `database` - connection URL and pool tuning
//! - `server` - HTTP bind address and worker count

pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Whether mutations should be mirrored into the audit log
    pub audit_enabled: bool,
}

impl AppConfig {
    /// Assemble the full configuration from the process environment.
    pub fn from_env() -> Self {
        let audit_enabled = std::env::var("ENABLE_AUDIT_LOGGING")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            audit_enabled,
        }
    }
}
