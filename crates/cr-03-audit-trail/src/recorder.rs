//! # Audit Recorder
//!
//! Builds records for mutations and reads. It does not write them: the
//! caller stages the returned records in the same storage batch as the
//! mutation they describe, so both commit or neither does.

use crate::domain::{
    snapshot, sparse_diff, AuditContext, AuditError, Auditable, EntityKind, NewAuditRecord,
};
use serde_json::Value;
use shared_types::Action;

/// Stateless record builder.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuditRecorder;

impl AuditRecorder {
    /// Create a recorder.
    pub fn new() -> Self {
        Self
    }

    /// Generic mutation record with caller-supplied snapshots.
    ///
    /// Snapshots must already be masked; prefer the typed helpers.
    pub fn record_mutation(
        &self,
        action: Action,
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        before: Option<Value>,
        after: Option<Value>,
        ctx: &AuditContext,
    ) -> NewAuditRecord {
        NewAuditRecord {
            timestamp: ctx.at,
            actor_id: ctx.actor_id,
            actor_name: ctx.actor_name.clone(),
            action,
            entity_type,
            entity_id: entity_id.into(),
            before,
            after,
            origin_ip: ctx.origin_ip.clone(),
            endpoint: ctx.endpoint.clone(),
        }
    }

    /// READ access record; carries no snapshots.
    pub fn record_read(
        &self,
        entity_type: EntityKind,
        entity_id: impl Into<String>,
        ctx: &AuditContext,
    ) -> NewAuditRecord {
        self.record_mutation(Action::Read, entity_type, entity_id, None, None, ctx)
    }

    /// CREATE: after-only.
    pub fn created<T: Auditable>(
        &self,
        entity: &T,
        ctx: &AuditContext,
    ) -> Result<NewAuditRecord, AuditError> {
        Ok(self.record_mutation(
            Action::Create,
            T::KIND,
            entity.audit_id(),
            None,
            Some(snapshot(entity)?),
            ctx,
        ))
    }

    /// UPDATE: sparse before, full after.
    pub fn updated<T: Auditable>(
        &self,
        before: &T,
        after: &T,
        ctx: &AuditContext,
    ) -> Result<NewAuditRecord, AuditError> {
        Ok(self.record_mutation(
            Action::Update,
            T::KIND,
            after.audit_id(),
            sparse_diff(before, after)?,
            Some(snapshot(after)?),
            ctx,
        ))
    }

    /// DELETE: before-only.
    pub fn deleted<T: Auditable>(
        &self,
        entity: &T,
        ctx: &AuditContext,
    ) -> Result<NewAuditRecord, AuditError> {
        Ok(self.record_mutation(
            Action::Delete,
            T::KIND,
            entity.audit_id(),
            Some(snapshot(entity)?),
            None,
            ctx,
        ))
    }

    /// READ of a typed entity.
    pub fn read<T: Auditable>(&self, entity: &T, ctx: &AuditContext) -> NewAuditRecord {
        self.record_read(T::KIND, entity.audit_id(), ctx)
    }
}
