//! PostgreSQL implementation of the AuditRepository trait.

use async_trait::async_trait;
use sqlx::PgPool;

use tb_core::domain::entities::NewAuditRecord;
use tb_core::errors::MarketResult;
use tb_core::repositories::AuditRepository;

use super::db_err;

pub(crate) const INSERT_AUDIT: &str = r#"
    INSERT INTO audit_logs
        (actor_id, entity_name, entity_id, action, previous_state, current_state)
    VALUES ($1, $2, $3, $4, $5, $6)
"#;

/// SQLx-backed audit trail.
///
/// When `enabled` is false every record is dropped, so the flag from
/// `ENABLE_AUDIT_LOGGING` turns the trail off without touching the services.
pub struct PgAuditRepository {
    pool: PgPool,
    enabled: bool,
}

impl PgAuditRepository {
    pub fn new(pool: PgPool, enabled: bool) -> Self {
        Self { pool, enabled }
    }
}

#[async_trait]
impl AuditRepository for PgAuditRepository {
    async fn record(&self, entry: NewAuditRecord) -> MarketResult<()> {
        if !self.enabled {
            return Ok(());
        }
        sqlx::query(INSERT_AUDIT)
            .bind(entry.actor_id)
            .bind(&entry.entity_name)
            .bind(entry.entity_id)
            .bind(entry.action.as_str())
            .bind(&entry.previous_state)
            .bind(&entry.current_state)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
