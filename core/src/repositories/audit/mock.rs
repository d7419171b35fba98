//! Mock implementation of AuditRepository for testing

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::entities::NewAuditRecord;
use crate::errors::MarketResult;

use super::trait_::AuditRepository;

/// In-memory audit repository for tests
#[derive(Clone, Default)]
pub struct MockAuditRepository {
    records: Arc<RwLock<Vec<NewAuditRecord>>>,
}

impl MockAuditRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything recorded so far, for assertions.
    pub async fn records(&self) -> Vec<NewAuditRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl AuditRepository for MockAuditRepository {
    async fn record(&self, entry: NewAuditRecord) -> MarketResult<()> {
        self.records.write().await.push(entry);
        Ok(())
    }
}
