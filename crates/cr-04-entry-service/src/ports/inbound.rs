//! # Inbound Ports (Driving)
//!
//! Public API of the entry engine. Every call takes the actor and request
//! descriptors explicitly.

use crate::domain::{
    CatalogFilter, CatalogPatch, EntryError, EntryFilter, EntryPage, EntryStats, EntryUpdate,
    EntryView, ModuleAvailability, ModuleCatalogEntry, NewCatalogEntry, NewEntry, StatsFilter,
};
use async_trait::async_trait;
use cr_03_audit_trail::{AuditRecord, EntityKind};
use shared_types::{Actor, EntryId, RequestContext, SchemaVersion, UserId};

/// Module entry operations.
#[async_trait]
pub trait EntryApi: Send + Sync {
    /// Validate, seal and persist a new entry; audited CREATE.
    async fn create_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        entry: NewEntry,
    ) -> Result<EntryView, EntryError>;

    /// Open an entry, optionally converted forward to `view_version`
    /// without persisting; audited READ.
    async fn get_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        view_version: Option<SchemaVersion>,
    ) -> Result<EntryView, EntryError>;

    /// Filtered, paged listing; one READ record per returned row.
    async fn list_entries(
        &self,
        actor: &Actor,
        request: &RequestContext,
        filter: EntryFilter,
    ) -> Result<EntryPage, EntryError>;

    /// Change payload and/or clinical time; audited UPDATE.
    async fn update_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        update: EntryUpdate,
    ) -> Result<EntryView, EntryError>;

    /// Migrate the stored payload forward to `target`; audited UPDATE.
    async fn upgrade_entry_version(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        target: SchemaVersion,
    ) -> Result<EntryView, EntryError>;

    /// Soft delete; audited DELETE.
    async fn delete_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        reason: Option<String>,
    ) -> Result<(), EntryError>;

    /// Clear the soft-delete marker; audited UPDATE.
    async fn restore_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<EntryView, EntryError>;

    /// Remove for good (administrators only); audited DELETE.
    async fn hard_delete_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<(), EntryError>;

    /// Create many entries in one unit of work.
    async fn bulk_create_entries(
        &self,
        actor: &Actor,
        request: &RequestContext,
        entries: Vec<NewEntry>,
    ) -> Result<Vec<EntryView>, EntryError>;

    /// Registered modules the actor may use.
    async fn available_modules(
        &self,
        actor: &Actor,
        include_schema: bool,
    ) -> Result<Vec<ModuleAvailability>, EntryError>;

    /// Live-entry counts per permitted module.
    async fn entry_stats(
        &self,
        actor: &Actor,
        filter: StatsFilter,
    ) -> Result<EntryStats, EntryError>;
}

/// Administrative module catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Add a module; administrators only.
    async fn create_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        module: NewCatalogEntry,
    ) -> Result<ModuleCatalogEntry, EntryError>;

    /// Patch a module; administrators only.
    async fn update_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
        patch: CatalogPatch,
    ) -> Result<ModuleCatalogEntry, EntryError>;

    /// Remove a module; administrators only.
    async fn delete_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
    ) -> Result<(), EntryError>;

    /// One module.
    async fn get_module(&self, actor: &Actor, code: &str) -> Result<ModuleCatalogEntry, EntryError>;

    /// Modules ordered by code.
    async fn list_modules(
        &self,
        actor: &Actor,
        filter: CatalogFilter,
    ) -> Result<Vec<ModuleCatalogEntry>, EntryError>;
}

/// Read-only audit queries; administrators only.
#[async_trait]
pub trait AuditQueryApi: Send + Sync {
    /// History of one entity, oldest first.
    async fn audit_for_entity(
        &self,
        actor: &Actor,
        entity_type: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, EntryError>;

    /// Everything one user did, optionally limited to an entity type.
    async fn audit_for_actor(
        &self,
        actor: &Actor,
        actor_id: UserId,
        entity_type: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, EntryError>;
}
