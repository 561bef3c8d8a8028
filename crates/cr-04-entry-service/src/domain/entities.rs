//! # Domain Entities
//!
//! Core entry types.
//!
//! [`StoredEntry`] is the persistence shape: the payload column holds only
//! the sealed string. [`EntryView`] and [`ListedEntry`] are what callers get
//! back, with the plaintext payload.

use super::lifecycle::EntryState;
use chrono::{Duration, NaiveDate, NaiveTime};
use cr_03_audit_trail::{Auditable, EntityKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_crypto::SealedPayload;
use shared_types::{
    DossierId, EntryId, OrgUnitId, Payload, SchemaVersion, Timestamp, UserId,
};
use std::collections::BTreeSet;

/// One module entry as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry {
    /// Entry id.
    pub id: EntryId,
    /// Owning dossier.
    pub dossier_id: DossierId,
    /// Org unit of the dossier at creation time, used for listing scope.
    pub org_unit_id: OrgUnitId,
    /// Module code.
    pub module_code: String,
    /// Version the payload conforms to.
    pub schema_version: SchemaVersion,
    /// `hex(nonce || ciphertext)`.
    pub sealed_payload: String,
    /// SHA-256 of the canonical plaintext payload.
    pub signature: String,
    /// Clinical time of the observation.
    pub occurred_at: Timestamp,
    /// Creation time.
    pub created_at: Timestamp,
    /// Creator.
    pub created_by: UserId,
    /// Last update time.
    pub updated_at: Option<Timestamp>,
    /// Last updater.
    pub updated_by: Option<UserId>,
    /// Soft-delete time.
    pub deleted_at: Option<Timestamp>,
    /// Who soft-deleted.
    pub deleted_by: Option<UserId>,
    /// Optional reason given at soft delete.
    pub delete_reason: Option<String>,
}

impl StoredEntry {
    /// Lifecycle state.
    pub fn state(&self) -> EntryState {
        if self.deleted_at.is_some() {
            EntryState::SoftDeleted
        } else {
            EntryState::Active
        }
    }

    /// Whether soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Sealed payload wrapper.
    pub fn sealed(&self) -> SealedPayload {
        SealedPayload::from_stored(self.sealed_payload.clone())
    }
}

impl Auditable for StoredEntry {
    const KIND: EntityKind = EntityKind::ModuleEntries;

    fn audit_id(&self) -> String {
        self.id.to_string()
    }

    fn masked_fields() -> &'static [&'static str] {
        &["sealed_payload", "signature"]
    }
}

/// A decrypted entry returned by `get_entry` and the mutating operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryView {
    /// Entry id.
    pub id: EntryId,
    /// Owning dossier.
    pub dossier_id: DossierId,
    /// Module code.
    pub module_code: String,
    /// Stored version.
    pub schema_version: SchemaVersion,
    /// Version the payload below conforms to (differs on view conversion).
    pub view_version: SchemaVersion,
    /// Plaintext payload.
    pub payload: Payload,
    /// Clinical time of the observation.
    pub occurred_at: Timestamp,
    /// Creation time.
    pub created_at: Timestamp,
    /// Creator.
    pub created_by: UserId,
    /// Last update time.
    pub updated_at: Option<Timestamp>,
    /// Last updater.
    pub updated_by: Option<UserId>,
    /// Soft-delete time (only visible to administrators).
    pub deleted_at: Option<Timestamp>,
    /// Whether the stored signature matched the decrypted payload.
    pub integrity_verified: bool,
}

impl EntryView {
    /// Build from a stored row and its opened payload.
    pub fn from_stored(
        entry: &StoredEntry,
        payload: Payload,
        view_version: SchemaVersion,
        integrity_verified: bool,
    ) -> Self {
        Self {
            id: entry.id,
            dossier_id: entry.dossier_id,
            module_code: entry.module_code.clone(),
            schema_version: entry.schema_version,
            view_version,
            payload,
            occurred_at: entry.occurred_at,
            created_at: entry.created_at,
            created_by: entry.created_by,
            updated_at: entry.updated_at,
            updated_by: entry.updated_by,
            deleted_at: entry.deleted_at,
            integrity_verified,
        }
    }
}

/// Payload slot of a listed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum ListedPayload {
    /// Opened payload.
    Data(Payload),
    /// The sealed payload could not be opened. Never an empty object.
    Unreadable,
}

impl ListedPayload {
    /// Opened payload, if readable.
    pub fn data(&self) -> Option<&Payload> {
        match self {
            ListedPayload::Data(payload) => Some(payload),
            ListedPayload::Unreadable => None,
        }
    }
}

/// One row of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListedEntry {
    /// Entry id.
    pub id: EntryId,
    /// Owning dossier.
    pub dossier_id: DossierId,
    /// Module code.
    pub module_code: String,
    /// Stored version.
    pub schema_version: SchemaVersion,
    /// Clinical time.
    pub occurred_at: Timestamp,
    /// Creation time.
    pub created_at: Timestamp,
    /// Soft-delete time.
    pub deleted_at: Option<Timestamp>,
    /// Payload or unreadable flag.
    pub payload: ListedPayload,
}

/// A page of listed entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPage {
    /// Rows, newest `occurred_at` first.
    pub items: Vec<ListedEntry>,
    /// Matches across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    /// Page size used.
    pub page_size: u32,
    /// Whether a later page exists.
    pub has_next: bool,
}

impl EntryPage {
    /// Empty first page.
    pub fn empty(page: u32, page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            page_size,
            has_next: false,
        }
    }
}

/// Create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    /// Target dossier.
    pub dossier_id: DossierId,
    /// Module code.
    pub module_code: String,
    /// Schema version; the latest registered one when absent.
    pub schema_version: Option<SchemaVersion>,
    /// Clinical time; now when absent.
    pub occurred_at: Option<Timestamp>,
    /// Raw payload.
    pub payload: Value,
}

impl NewEntry {
    /// Request at the latest version, occurring now.
    pub fn new(dossier_id: DossierId, module_code: impl Into<String>, payload: Value) -> Self {
        Self {
            dossier_id,
            module_code: module_code.into(),
            schema_version: None,
            occurred_at: None,
            payload,
        }
    }

    /// Pin the schema version.
    pub fn with_version(mut self, version: SchemaVersion) -> Self {
        self.schema_version = Some(version);
        self
    }

    /// Set the clinical time.
    pub fn occurred_at(mut self, at: Timestamp) -> Self {
        self.occurred_at = Some(at);
        self
    }
}

/// Partial update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryUpdate {
    /// Replacement payload, validated against the stored version.
    pub payload: Option<Value>,
    /// New clinical time.
    pub occurred_at: Option<Timestamp>,
}

impl EntryUpdate {
    /// Whether nothing would change.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none() && self.occurred_at.is_none()
    }
}

/// Listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFilter {
    /// Only this dossier.
    pub dossier_id: Option<DossierId>,
    /// Only this module.
    pub module_code: Option<String>,
    /// Earliest clinical date, inclusive.
    pub occurred_from: Option<NaiveDate>,
    /// Latest clinical date, inclusive.
    pub occurred_to: Option<NaiveDate>,
    /// Include soft-deleted rows.
    pub include_deleted: bool,
    /// 1-based page.
    pub page: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl Default for EntryFilter {
    fn default() -> Self {
        Self {
            dossier_id: None,
            module_code: None,
            occurred_from: None,
            occurred_to: None,
            include_deleted: false,
            page: 1,
            page_size: 50,
        }
    }
}

/// Statistics filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsFilter {
    /// Only this dossier.
    pub dossier_id: Option<DossierId>,
    /// Earliest clinical date, inclusive.
    pub occurred_from: Option<NaiveDate>,
    /// Latest clinical date, inclusive.
    pub occurred_to: Option<NaiveDate>,
}

/// Count of live entries for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleCount {
    /// Module code.
    pub code: String,
    /// Live entries.
    pub count: u64,
}

/// Aggregate entry counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryStats {
    /// Per module, ordered by code.
    pub modules: Vec<ModuleCount>,
    /// Sum of all counts.
    pub total: u64,
}

/// A module the actor may use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleAvailability {
    /// Module code.
    pub code: String,
    /// Registered versions, ascending.
    pub versions: Vec<SchemaVersion>,
    /// Highest version.
    pub latest_version: SchemaVersion,
    /// Description of the latest schema, when requested.
    pub schema: Option<Value>,
}

/// Store-level query built by the service from a filter and the actor's scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// Only this dossier.
    pub dossier_id: Option<DossierId>,
    /// Only dossiers of this org unit.
    pub org_unit_id: Option<OrgUnitId>,
    /// Only these module codes; `None` means every code.
    pub module_codes: Option<BTreeSet<String>>,
    /// `occurred_at >= occurred_from`.
    pub occurred_from: Option<Timestamp>,
    /// `occurred_at < occurred_before`.
    pub occurred_before: Option<Timestamp>,
    /// Include soft-deleted rows.
    pub include_deleted: bool,
    /// Rows to skip.
    pub offset: usize,
    /// Maximum rows; `None` means all.
    pub limit: Option<usize>,
}

impl EntryQuery {
    /// Whether a row matches, ignoring paging.
    pub fn matches(&self, entry: &StoredEntry) -> bool {
        self.dossier_id.map_or(true, |id| entry.dossier_id == id)
            && self.org_unit_id.map_or(true, |id| entry.org_unit_id == id)
            && self
                .module_codes
                .as_ref()
                .map_or(true, |codes| codes.contains(&entry.module_code))
            && self.occurred_from.map_or(true, |from| entry.occurred_at >= from)
            && self.occurred_before.map_or(true, |before| entry.occurred_at < before)
            && (self.include_deleted || !entry.is_deleted())
    }

    /// Set the clinical-date window; both bounds inclusive.
    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.occurred_from = from.map(start_of_day);
        self.occurred_before = to.map(|day| start_of_day(day) + Duration::days(1));
        self
    }
}

fn start_of_day(day: NaiveDate) -> Timestamp {
    day.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use cr_03_audit_trail::{leaks_sensitive, snapshot, MASK_TOKEN};
    use uuid::Uuid;

    fn entry(occurred_at: Timestamp) -> StoredEntry {
        StoredEntry {
            id: Uuid::new_v4(),
            dossier_id: Uuid::new_v4(),
            org_unit_id: Uuid::new_v4(),
            module_code: "M1".into(),
            schema_version: 1,
            sealed_payload: "00ff".into(),
            signature: "ab".into(),
            occurred_at,
            created_at: occurred_at,
            created_by: Uuid::new_v4(),
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
            delete_reason: None,
        }
    }

    #[test]
    fn test_snapshot_never_shows_sealed_payload() {
        let snap = snapshot(&entry(Utc::now())).unwrap();
        assert_eq!(snap["sealed_payload"], MASK_TOKEN);
        assert_eq!(snap["signature"], MASK_TOKEN);
        assert_eq!(snap["module_code"], "M1");
        assert!(!leaks_sensitive::<StoredEntry>(&snap));
    }

    #[test]
    fn test_date_window_is_inclusive() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let query = EntryQuery::default().with_dates(Some(day), Some(day));

        let late = Utc.with_ymd_and_hms(2025, 3, 14, 23, 59, 59).unwrap();
        let next = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0).unwrap();

        assert!(query.matches(&entry(late)));
        assert!(query.matches(&entry(early)));
        assert!(!query.matches(&entry(next)));
    }

    #[test]
    fn test_deleted_rows_hidden_by_default() {
        let mut row = entry(Utc::now());
        row.deleted_at = Some(Utc::now());
        assert_eq!(row.state(), EntryState::SoftDeleted);
        assert!(!EntryQuery::default().matches(&row));
        assert!(EntryQuery {
            include_deleted: true,
            ..EntryQuery::default()
        }
        .matches(&row));
    }
}
