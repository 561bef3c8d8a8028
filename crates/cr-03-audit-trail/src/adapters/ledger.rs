//! In-memory append-only ledger.
//!
//! Has a failure switch so callers can check that a refused audit append
//! aborts the surrounding mutation.

use crate::domain::{AuditError, AuditRecord, EntityKind, NewAuditRecord};
use crate::ports::AuditStore;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::UserId;
use std::sync::atomic::{AtomicBool, Ordering};

/// Vector-backed ledger.
#[derive(Default)]
pub struct InMemoryAuditLedger {
    records: RwLock<Vec<AuditRecord>>,
    refuse_appends: AtomicBool,
}

impl InMemoryAuditLedger {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail (or succeed again).
    pub fn set_refuse_appends(&self, refuse: bool) {
        self.refuse_appends.store(refuse, Ordering::SeqCst);
    }

    /// Synchronous all-or-nothing append, usable while the caller holds its
    /// own lock.
    pub fn append_now(
        &self,
        records: Vec<NewAuditRecord>,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        if self.refuse_appends.load(Ordering::SeqCst) {
            return Err(AuditError::WriteFailed("audit ledger refused the append".into()));
        }
        let mut stored = self.records.write();
        let first = stored.last().map(|r| r.sequence + 1).unwrap_or(1);
        let appended: Vec<AuditRecord> = records
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_record(first + i as u64))
            .collect();
        stored.extend(appended.iter().cloned());
        Ok(appended)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the ledger is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Copy of every record, oldest first.
    pub fn all(&self) -> Vec<AuditRecord> {
        self.records.read().clone()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditLedger {
    async fn append(&self, records: Vec<NewAuditRecord>) -> Result<Vec<AuditRecord>, AuditError> {
        self.append_now(records)
    }

    async fn by_entity(
        &self,
        kind: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.entity_type == kind && r.entity_id == entity_id)
            .cloned()
            .collect())
    }

    async fn by_actor(
        &self,
        actor_id: UserId,
        kind: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, AuditError> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.actor_id == actor_id && kind.map_or(true, |k| r.entity_type == k))
            .cloned()
            .collect())
    }
}
