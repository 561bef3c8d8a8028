//! # Inbound Ports
//!
//! Read-only audit query surface.

use crate::domain::{AuditError, AuditRecord, EntityKind};
use async_trait::async_trait;
use shared_types::UserId;

/// Audit Trail API - inbound port.
#[async_trait]
pub trait AuditTrailApi: Send + Sync {
    /// History of one entity.
    async fn for_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditError>;

    /// Everything one actor did, optionally per entity kind.
    async fn for_actor(
        &self,
        actor_id: UserId,
        kind: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, AuditError>;
}
