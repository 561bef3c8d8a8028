//! # Outbound Ports (Driven)
//!
//! What the entry service needs from its environment.

use crate::domain::{EntryQuery, ModuleCatalogEntry, StoreError, StoredEntry};
use async_trait::async_trait;
use cr_03_audit_trail::NewAuditRecord;
use shared_types::{EntryId, Timestamp};
use std::collections::BTreeMap;

/// Persistence of entries, catalog rows and audit records.
///
/// Reads may suspend. Writes go through [`EntryStore::atomic_batch_write`]
/// only, so a mutation and its audit record share one unit of work.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetch by id, deleted or not.
    async fn get_entry(&self, id: EntryId) -> Result<Option<StoredEntry>, StoreError>;

    /// Rows matching `query`, ordered by `occurred_at` descending, plus the
    /// total number of matches before paging.
    async fn query_entries(&self, query: &EntryQuery) -> Result<QueriedEntries, StoreError>;

    /// Matching rows per module code; paging is ignored.
    async fn count_by_module(
        &self,
        query: &EntryQuery,
    ) -> Result<BTreeMap<String, u64>, StoreError>;

    /// Catalog row by normalized code.
    async fn get_catalog(&self, code: &str) -> Result<Option<ModuleCatalogEntry>, StoreError>;

    /// All catalog rows ordered by code.
    async fn list_catalog(&self) -> Result<Vec<ModuleCatalogEntry>, StoreError>;

    /// Apply every operation or none.
    ///
    /// A refused `AppendAudit` is reported as [`StoreError::AuditRejected`]
    /// and leaves the store unchanged.
    async fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError>;
}

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueriedEntries {
    /// Rows in the requested window.
    pub rows: Vec<StoredEntry>,
    /// Matches before paging.
    pub total: u64,
}

/// Batch operation for atomic writes.
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOperation {
    /// Insert or replace an entry.
    PutEntry(StoredEntry),
    /// Remove an entry row.
    RemoveEntry(EntryId),
    /// Insert or replace a catalog row.
    PutCatalog(ModuleCatalogEntry),
    /// Remove a catalog row.
    RemoveCatalog(String),
    /// Append an audit record.
    AppendAudit(NewAuditRecord),
}

impl BatchOperation {
    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            BatchOperation::PutEntry(_) => "put_entry",
            BatchOperation::RemoveEntry(_) => "remove_entry",
            BatchOperation::PutCatalog(_) => "put_catalog",
            BatchOperation::RemoveCatalog(_) => "remove_catalog",
            BatchOperation::AppendAudit(_) => "append_audit",
        }
    }
}

/// Abstract interface for time operations (for testability).
pub trait TimeSource: Send + Sync {
    /// Current time.
    fn now(&self) -> Timestamp;
}
