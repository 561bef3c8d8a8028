//! # Port Implementations
//!
//! Delegates to the operation modules and logs failures at one place:
//! rejections at `warn`, integrity and infrastructure failures at `error`.

use super::*;
use crate::domain::{
    CatalogFilter, CatalogPatch, EntryFilter, EntryPage, EntryStats, EntryUpdate, EntryView,
    ModuleAvailability, ModuleCatalogEntry, NewCatalogEntry, NewEntry, StatsFilter,
};
use crate::ports::{AuditQueryApi, CatalogApi, EntryApi};
use async_trait::async_trait;
use cr_03_audit_trail::{AuditRecord, EntityKind};
use shared_types::UserId;

fn logged<V>(
    operation: &'static str,
    actor: &Actor,
    result: Result<V, EntryError>,
) -> Result<V, EntryError> {
    if let Err(err) = &result {
        if err.is_rejection() {
            warn!(actor = %actor.id, "[cr-04] {} rejected: {}", operation, err);
        } else {
            error!(actor = %actor.id, "[cr-04] {} failed: {}", operation, err);
        }
    }
    result
}

#[async_trait]
impl<R, S, G, A, T> EntryApi for EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    async fn create_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        entry: NewEntry,
    ) -> Result<EntryView, EntryError> {
        logged("create_entry", actor, self.do_create(actor, request, entry).await)
    }

    async fn get_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        view_version: Option<SchemaVersion>,
    ) -> Result<EntryView, EntryError> {
        logged("get_entry", actor, self.do_get(actor, request, id, view_version).await)
    }

    async fn list_entries(
        &self,
        actor: &Actor,
        request: &RequestContext,
        filter: EntryFilter,
    ) -> Result<EntryPage, EntryError> {
        logged("list_entries", actor, self.do_list(actor, request, filter).await)
    }

    async fn update_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        update: EntryUpdate,
    ) -> Result<EntryView, EntryError> {
        logged("update_entry", actor, self.do_update(actor, request, id, update).await)
    }

    async fn upgrade_entry_version(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        target: SchemaVersion,
    ) -> Result<EntryView, EntryError> {
        logged(
            "upgrade_entry_version",
            actor,
            self.do_upgrade(actor, request, id, target).await,
        )
    }

    async fn delete_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        reason: Option<String>,
    ) -> Result<(), EntryError> {
        logged("delete_entry", actor, self.do_soft_delete(actor, request, id, reason).await)
    }

    async fn restore_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<EntryView, EntryError> {
        logged("restore_entry", actor, self.do_restore(actor, request, id).await)
    }

    async fn hard_delete_entry(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<(), EntryError> {
        logged("hard_delete_entry", actor, self.do_hard_delete(actor, request, id).await)
    }

    async fn bulk_create_entries(
        &self,
        actor: &Actor,
        request: &RequestContext,
        entries: Vec<NewEntry>,
    ) -> Result<Vec<EntryView>, EntryError> {
        logged(
            "bulk_create_entries",
            actor,
            self.do_bulk_create(actor, request, entries).await,
        )
    }

    async fn available_modules(
        &self,
        actor: &Actor,
        include_schema: bool,
    ) -> Result<Vec<ModuleAvailability>, EntryError> {
        logged(
            "available_modules",
            actor,
            self.do_available_modules(actor, include_schema).await,
        )
    }

    async fn entry_stats(
        &self,
        actor: &Actor,
        filter: StatsFilter,
    ) -> Result<EntryStats, EntryError> {
        logged("entry_stats", actor, self.do_stats(actor, filter).await)
    }
}

#[async_trait]
impl<R, S, G, A, T> CatalogApi for EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    async fn create_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        module: NewCatalogEntry,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        logged("create_module", actor, self.do_create_module(actor, request, module).await)
    }

    async fn update_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
        patch: CatalogPatch,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        logged(
            "update_module",
            actor,
            self.do_update_module(actor, request, code, patch).await,
        )
    }

    async fn delete_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
    ) -> Result<(), EntryError> {
        logged("delete_module", actor, self.do_delete_module(actor, request, code).await)
    }

    async fn get_module(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        logged("get_module", actor, self.do_get_module(actor, code).await)
    }

    async fn list_modules(
        &self,
        actor: &Actor,
        filter: CatalogFilter,
    ) -> Result<Vec<ModuleCatalogEntry>, EntryError> {
        logged("list_modules", actor, self.do_list_modules(actor, filter).await)
    }
}

#[async_trait]
impl<R, S, G, A, T> AuditQueryApi for EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    async fn audit_for_entity(
        &self,
        actor: &Actor,
        entity_type: EntityKind,
        entity_id: &str,
    ) -> Result<Vec<AuditRecord>, EntryError> {
        let result = async {
            self.gate.require_administrator(actor, "audit queries")?;
            Ok::<_, EntryError>(self.audit.for_entity(entity_type, entity_id).await?)
        }
        .await;
        logged("audit_for_entity", actor, result)
    }

    async fn audit_for_actor(
        &self,
        actor: &Actor,
        actor_id: UserId,
        entity_type: Option<EntityKind>,
    ) -> Result<Vec<AuditRecord>, EntryError> {
        let result = async {
            self.gate.require_administrator(actor, "audit queries")?;
            Ok::<_, EntryError>(self.audit.for_actor(actor_id, entity_type).await?)
        }
        .await;
        logged("audit_for_actor", actor, result)
    }
}
