//! In-memory entry store.
//!
//! Holds entries and catalog rows behind one mutex and writes audit records
//! to an [`InMemoryAuditLedger`] while that mutex is held. A batch is
//! checked completely, then the audit append runs, then the row changes are
//! applied; the append is the only step that can still fail, so a refused
//! append leaves nothing behind.

use crate::domain::{EntryQuery, ModuleCatalogEntry, StoreError, StoredEntry};
use crate::ports::{BatchOperation, EntryStore, QueriedEntries};
use async_trait::async_trait;
use cr_03_audit_trail::{InMemoryAuditLedger, NewAuditRecord};
use parking_lot::Mutex;
use shared_types::EntryId;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Tables {
    entries: HashMap<EntryId, StoredEntry>,
    catalog: BTreeMap<String, ModuleCatalogEntry>,
}

/// Entry store for tests and single-process use.
pub struct InMemoryEntryStore {
    tables: Mutex<Tables>,
    ledger: Arc<InMemoryAuditLedger>,
    unavailable: AtomicBool,
}

impl InMemoryEntryStore {
    /// Store writing audit records to `ledger`.
    pub fn new(ledger: Arc<InMemoryAuditLedger>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            ledger,
            unavailable: AtomicBool::new(false),
        }
    }

    /// The audit ledger this store appends to.
    pub fn ledger(&self) -> &Arc<InMemoryAuditLedger> {
        &self.ledger
    }

    /// Make every call fail with `StoreError::Unavailable` (or recover).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of entry rows, deleted included.
    pub fn entry_count(&self) -> usize {
        self.tables.lock().entries.len()
    }

    /// Overwrite the sealed payload of a row, bypassing every check.
    /// Used to simulate corrupted or foreign-key data.
    pub fn corrupt_payload(&self, id: EntryId, sealed: impl Into<String>) -> bool {
        match self.tables.lock().entries.get_mut(&id) {
            Some(entry) => {
                entry.sealed_payload = sealed.into();
                true
            }
            None => false,
        }
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store switched off".into()));
        }
        Ok(())
    }
}

fn check_batch(tables: &Tables, operations: &[BatchOperation]) -> Result<(), StoreError> {
    let mut entries: HashSet<EntryId> = HashSet::new();
    let mut codes: HashSet<&str> = HashSet::new();
    for op in operations {
        match op {
            BatchOperation::PutEntry(entry) => {
                entries.insert(entry.id);
            }
            BatchOperation::PutCatalog(row) => {
                codes.insert(row.code.as_str());
            }
            BatchOperation::RemoveEntry(id) => {
                if !tables.entries.contains_key(id) && !entries.contains(id) {
                    return Err(StoreError::Missing(format!("entry {}", id)));
                }
            }
            BatchOperation::RemoveCatalog(code) => {
                if !tables.catalog.contains_key(code) && !codes.contains(code.as_str()) {
                    return Err(StoreError::Missing(format!("module {}", code)));
                }
            }
            BatchOperation::AppendAudit(_) => {}
        }
    }
    Ok(())
}

#[async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn get_entry(&self, id: EntryId) -> Result<Option<StoredEntry>, StoreError> {
        self.check_available()?;
        Ok(self.tables.lock().entries.get(&id).cloned())
    }

    async fn query_entries(&self, query: &EntryQuery) -> Result<QueriedEntries, StoreError> {
        self.check_available()?;
        let tables = self.tables.lock();
        let mut matching: Vec<&StoredEntry> =
            tables.entries.values().filter(|e| query.matches(e)).collect();
        matching.sort_by(|a, b| {
            b.occurred_at
                .cmp(&a.occurred_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });

        let total = matching.len() as u64;
        let rows = matching
            .into_iter()
            .skip(query.offset)
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();
        Ok(QueriedEntries { rows, total })
    }

    async fn count_by_module(
        &self,
        query: &EntryQuery,
    ) -> Result<BTreeMap<String, u64>, StoreError> {
        self.check_available()?;
        let mut counts = BTreeMap::new();
        for entry in self.tables.lock().entries.values().filter(|e| query.matches(e)) {
            *counts.entry(entry.module_code.clone()).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn get_catalog(&self, code: &str) -> Result<Option<ModuleCatalogEntry>, StoreError> {
        self.check_available()?;
        Ok(self.tables.lock().catalog.get(code).cloned())
    }

    async fn list_catalog(&self) -> Result<Vec<ModuleCatalogEntry>, StoreError> {
        self.check_available()?;
        Ok(self.tables.lock().catalog.values().cloned().collect())
    }

    async fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        self.check_available()?;
        let mut tables = self.tables.lock();
        check_batch(&tables, &operations)?;

        let mut rows = Vec::new();
        let mut records: Vec<NewAuditRecord> = Vec::new();
        for op in operations {
            match op {
                BatchOperation::AppendAudit(record) => records.push(record),
                other => rows.push(other),
            }
        }

        if !records.is_empty() {
            self.ledger
                .append_now(records)
                .map_err(|e| StoreError::AuditRejected(e.to_string()))?;
        }

        for op in rows {
            match op {
                BatchOperation::PutEntry(entry) => {
                    tables.entries.insert(entry.id, entry);
                }
                BatchOperation::RemoveEntry(id) => {
                    tables.entries.remove(&id);
                }
                BatchOperation::PutCatalog(row) => {
                    tables.catalog.insert(row.code.clone(), row);
                }
                BatchOperation::RemoveCatalog(code) => {
                    tables.catalog.remove(&code);
                }
                BatchOperation::AppendAudit(_) => {}
            }
        }
        Ok(())
    }
}
