//! Audit trail entries written explicitly by the services.
//!
//! There is no implicit change tracking: each mutating operation emits its
//! own record, and booking operations write theirs inside the booking
//! transaction so the trail commits or rolls back with the business writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of mutation an audit record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "CREATE",
            AuditAction::Update => "UPDATE",
            AuditAction::Delete => "DELETE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "CREATE" => Some(AuditAction::Create),
            "UPDATE" => Some(AuditAction::Update),
            "DELETE" => Some(AuditAction::Delete),
            _ => None,
        }
    }
}

/// A persisted audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: i64,
    pub actor_id: i64,
    pub entity_name: String,
    pub entity_id: i64,
    pub action: AuditAction,
    pub previous_state: Option<serde_json::Value>,
    pub current_state: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Payload for inserting a new audit record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAuditRecord {
    pub actor_id: i64,
    pub entity_name: String,
    pub entity_id: i64,
    pub action: AuditAction,
    pub previous_state: Option<serde_json::Value>,
    pub current_state: Option<serde_json::Value>,
}

impl NewAuditRecord {
    /// Record for a freshly created entity.
    pub fn created<T: Serialize>(
        actor_id: i64,
        entity_name: &str,
        entity_id: i64,
        current: &T,
    ) -> Self {
        Self {
            actor_id,
            entity_name: entity_name.to_string(),
            entity_id,
            action: AuditAction::Create,
            previous_state: None,
            current_state: serde_json::to_value(current).ok(),
        }
    }

    /// Record for an in-place update, with before and after snapshots.
    pub fn updated<T: Serialize>(
        actor_id: i64,
        entity_name: &str,
        entity_id: i64,
        previous: &T,
        current: &T,
    ) -> Self {
        Self {
            actor_id,
            entity_name: entity_name.to_string(),
            entity_id,
            action: AuditAction::Update,
            previous_state: serde_json::to_value(previous).ok(),
            current_state: serde_json::to_value(current).ok(),
        }
    }

    /// Record for a deleted entity, keeping its final snapshot.
    pub fn deleted<T: Serialize>(
        actor_id: i64,
        entity_name: &str,
        entity_id: i64,
        previous: &T,
    ) -> Self {
        Self {
            actor_id,
            entity_name: entity_name.to_string(),
            entity_id,
            action: AuditAction::Delete,
            previous_state: serde_json::to_value(previous).ok(),
            current_state: None,
        }
    }
}
