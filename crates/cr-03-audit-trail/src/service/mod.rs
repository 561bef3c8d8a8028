//! # Audit Trail Service
//!
//! Query surface over an [`AuditStore`].

use crate::domain::{AuditError, AuditRecord, EntityKind};
use crate::ports::{AuditStore, AuditTrailApi};
use async_trait::async_trait;
use shared_types::UserId;
use std::sync::Arc;
use tracing::debug;

/// Read-only audit service.
pub struct AuditTrail<S: AuditStore> {
    store: Arc<S>,
}

impl<S: AuditStore> AuditTrail<S> {
    /// Create the service.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: AuditStore> AuditTrailApi for AuditTrail<S> {
    async fn for_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self.store.by_entity(kind, entity_id).await?;
        debug!("[cr-03] {} record(s) for {} {}", records.len(), kind, entity_id);
        Ok(records)
    }

    async fn for_actor(
        &self,
        actor_id: UserId,
        kind: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        let records = self.store.by_actor(actor_id, kind).await?;
        debug!("[cr-03] {} record(s) for actor {}", records.len(), actor_id);
        Ok(records)
    }
}

#[cfg(test)]
mod tests;
