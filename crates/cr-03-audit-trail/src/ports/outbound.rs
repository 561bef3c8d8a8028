//! # Outbound Ports (Driven Ports)
//!
//! Append-only audit storage. There is no update or delete operation.

use crate::domain::{AuditError, AuditRecord, EntityKind, NewAuditRecord};
use async_trait::async_trait;
use shared_types::UserId;

/// Append-only audit store.
///
/// Production: the host's audit table, written inside the same transaction
/// as the audited mutation.
/// Testing: `InMemoryAuditLedger` (adapters).
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Append records atomically: all get sequence ids, or none are stored.
    async fn append(&self, records: Vec<NewAuditRecord>) -> Result<Vec<AuditRecord>, AuditError>;

    /// Records about one entity, oldest first.
    async fn by_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditError>;

    /// Records by one actor, optionally limited to one entity kind, oldest first.
    async fn by_actor(
        &self,
        actor_id: UserId,
        kind: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, AuditError>;
}
