//! # Module Catalog Operations

use super::*;
use crate::domain::{
    check_name, check_schema_version, normalize_code, CatalogFilter, CatalogPatch,
    ModuleCatalogEntry, NewCatalogEntry,
};
use tracing::info;

const CATALOG_CHANGES: &str = "module catalog changes";

impl<R, S, G, A, T> EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    async fn load_module(&self, code: &str) -> Result<ModuleCatalogEntry, EntryError> {
        let code = normalize_code(code)?;
        self.store
            .get_catalog(&code)
            .await?
            .ok_or_else(|| EntryError::NotFound("module".into()))
    }

    pub(super) async fn do_create_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        module: NewCatalogEntry,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        self.gate.require_administrator(actor, CATALOG_CHANGES)?;
        let code = normalize_code(&module.code)?;
        check_schema_version(module.current_schema_version)?;
        check_name(module.name.as_deref())?;

        if self.store.get_catalog(&code).await?.is_some() {
            return Err(EntryError::Conflict(format!(
                "Module with code '{}' already exists",
                code
            )));
        }

        let ctx = self.audit_context(actor, request);
        let row = ModuleCatalogEntry {
            code,
            name: module.name,
            current_schema_version: module.current_schema_version,
            active: module.active,
            updated_at: ctx.at.date_naive(),
        };
        let record = self.recorder.created(&row, &ctx)?;
        self.commit(vec![
            BatchOperation::PutCatalog(row.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Module {} added to catalog by {}", row.code, actor.id);
        Ok(row)
    }

    pub(super) async fn do_update_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
        patch: CatalogPatch,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        self.gate.require_administrator(actor, CATALOG_CHANGES)?;
        let before = self.load_module(code).await?;

        let ctx = self.audit_context(actor, request);
        let mut after = before.clone();
        patch.apply(&mut after, ctx.at.date_naive())?;

        let record = self.recorder.updated(&before, &after, &ctx)?;
        self.commit(vec![
            BatchOperation::PutCatalog(after.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Module {} updated by {}", after.code, actor.id);
        Ok(after)
    }

    pub(super) async fn do_delete_module(
        &self,
        actor: &Actor,
        request: &RequestContext,
        code: &str,
    ) -> Result<(), EntryError> {
        self.gate.require_administrator(actor, CATALOG_CHANGES)?;
        let row = self.load_module(code).await?;

        let ctx = self.audit_context(actor, request);
        let record = self.recorder.deleted(&row, &ctx)?;
        self.commit(vec![
            BatchOperation::RemoveCatalog(row.code.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Module {} removed from catalog by {}", row.code, actor.id);
        Ok(())
    }

    pub(super) async fn do_get_module(
        &self,
        actor: &Actor,
        code: &str,
    ) -> Result<ModuleCatalogEntry, EntryError> {
        debug!("[cr-04] Catalog lookup {} by {}", code, actor.id);
        self.load_module(code).await
    }

    pub(super) async fn do_list_modules(
        &self,
        actor: &Actor,
        filter: CatalogFilter,
    ) -> Result<Vec<ModuleCatalogEntry>, EntryError> {
        let rows: Vec<ModuleCatalogEntry> = self
            .store
            .list_catalog()
            .await?
            .into_iter()
            .filter(|row| filter.matches(row))
            .collect();
        debug!("[cr-04] Catalog listing: {} row(s) for {}", rows.len(), actor.id);
        Ok(rows)
    }
}
