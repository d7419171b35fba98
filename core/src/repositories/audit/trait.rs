//! Audit repository trait for the explicit audit trail.

use async_trait::async_trait;

use crate::domain::entities::NewAuditRecord;
use crate::errors::MarketResult;

/// Contract for appending audit records.
///
/// Catalog mutations call this directly after the write. Booking operations
/// do not: their audit rows go through the booking transaction so they share
/// its atomicity.
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// Append one audit record.
    async fn record(&self, entry: NewAuditRecord) -> MarketResult<()>;
}
