//! # Entry Operations
//!
//! State-changing operations and single-entry reads.

use super::*;
use crate::domain::{check_upgrade_target, EntryUpdate, EntryView, NewEntry, Transition};
use cr_02_access_gate::domain::check_not_deleted;
use shared_types::Timestamp;
use tracing::info;
use uuid::Uuid;

impl<R, S, G, A, T> EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    /// Gate, resolve version, validate and seal one create request.
    async fn prepare_entry(
        &self,
        actor: &Actor,
        request: NewEntry,
        now: Timestamp,
    ) -> Result<(StoredEntry, Payload), EntryError> {
        let dossier = self
            .gate
            .authorize_dossier(actor, request.dossier_id, Action::Create)
            .await?;
        self.gate
            .authorize_module(actor, &request.module_code, Action::Create)
            .await?;

        let version = self.resolve_version(&request.module_code, request.schema_version)?;
        let payload = self.validate(&request.module_code, version, &request.payload)?;
        let (sealed_payload, signature) = self.seal(&payload)?;

        let entry = StoredEntry {
            id: Uuid::new_v4(),
            dossier_id: dossier.id,
            org_unit_id: dossier.org_unit_id,
            module_code: request.module_code,
            schema_version: version,
            sealed_payload,
            signature,
            occurred_at: request.occurred_at.unwrap_or(now),
            created_at: now,
            created_by: actor.id,
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
            delete_reason: None,
        };
        Ok((entry, payload))
    }

    pub(super) async fn do_create(
        &self,
        actor: &Actor,
        request: &RequestContext,
        new_entry: NewEntry,
    ) -> Result<EntryView, EntryError> {
        let ctx = self.audit_context(actor, request);
        let (entry, payload) = self.prepare_entry(actor, new_entry, ctx.at).await?;
        let record = self.recorder.created(&entry, &ctx)?;

        self.commit(vec![
            BatchOperation::PutEntry(entry.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!(
            "[cr-04] Entry {} created ({} v{}) by {}",
            entry.id, entry.module_code, entry.schema_version, actor.id
        );
        Ok(EntryView::from_stored(&entry, payload, entry.schema_version, true))
    }

    pub(super) async fn do_bulk_create(
        &self,
        actor: &Actor,
        request: &RequestContext,
        new_entries: Vec<NewEntry>,
    ) -> Result<Vec<EntryView>, EntryError> {
        if new_entries.len() > self.config.max_bulk_entries {
            return Err(EntryError::InvalidRequest(format!(
                "Max {} entries per bulk request",
                self.config.max_bulk_entries
            )));
        }
        if new_entries.is_empty() {
            return Ok(Vec::new());
        }

        let ctx = self.audit_context(actor, request);
        let mut operations = Vec::with_capacity(new_entries.len() * 2);
        let mut views = Vec::with_capacity(new_entries.len());
        for (index, new_entry) in new_entries.into_iter().enumerate() {
            let (entry, payload) = self
                .prepare_entry(actor, new_entry, ctx.at)
                .await
                .inspect_err(|e| debug!("[cr-04] Bulk item {} rejected: {}", index, e))?;
            let record = self.recorder.created(&entry, &ctx)?;
            views.push(EntryView::from_stored(&entry, payload, entry.schema_version, true));
            operations.push(BatchOperation::PutEntry(entry));
            operations.push(BatchOperation::AppendAudit(record));
        }

        self.commit(operations).await?;
        info!("[cr-04] Bulk created {} entries by {}", views.len(), actor.id);
        Ok(views)
    }

    pub(super) async fn do_get(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        view_version: Option<SchemaVersion>,
    ) -> Result<EntryView, EntryError> {
        let entry = self.load_entry(id).await?;
        self.authorize_entry(actor, &entry, Action::Read).await?;
        check_not_deleted(actor, entry.is_deleted(), Action::Read, "entry")?;

        // The stored record was read even if opening or conversion fails.
        let outcome = self.view(&entry, view_version);
        let ctx = self.audit_context(actor, request);
        self.commit(vec![BatchOperation::AppendAudit(self.recorder.read(&entry, &ctx))])
            .await?;
        outcome
    }

    fn view(
        &self,
        entry: &StoredEntry,
        view_version: Option<SchemaVersion>,
    ) -> Result<EntryView, EntryError> {
        let (payload, verified) = self.open_entry(entry)?;
        let target = view_version.unwrap_or(entry.schema_version);
        let payload =
            self.registry
                .migrate(&entry.module_code, entry.schema_version, target, payload)?;
        if target != entry.schema_version {
            debug!(
                "[cr-04] Entry {} viewed as v{} (stored v{})",
                entry.id, target, entry.schema_version
            );
        }
        Ok(EntryView::from_stored(entry, payload, target, verified))
    }

    pub(super) async fn do_update(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        update: EntryUpdate,
    ) -> Result<EntryView, EntryError> {
        if update.is_empty() {
            return Err(EntryError::InvalidRequest("nothing to update".into()));
        }

        let before = self.load_entry(id).await?;
        self.authorize_entry(actor, &before, Action::Update).await?;
        Transition::Update.check(before.state())?;

        let ctx = self.audit_context(actor, request);
        let mut after = before.clone();
        let (payload, verified) = match &update.payload {
            Some(raw) => {
                let payload = self.validate(&before.module_code, before.schema_version, raw)?;
                let (sealed_payload, signature) = self.seal(&payload)?;
                after.sealed_payload = sealed_payload;
                after.signature = signature;
                (payload, true)
            }
            None => self.open_entry(&before)?,
        };
        if let Some(occurred_at) = update.occurred_at {
            after.occurred_at = occurred_at;
        }
        after.updated_at = Some(ctx.at);
        after.updated_by = Some(actor.id);

        let record = self.recorder.updated(&before, &after, &ctx)?;
        self.commit(vec![
            BatchOperation::PutEntry(after.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Entry {} updated by {}", after.id, actor.id);
        Ok(EntryView::from_stored(&after, payload, after.schema_version, verified))
    }

    pub(super) async fn do_upgrade(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        target: SchemaVersion,
    ) -> Result<EntryView, EntryError> {
        let before = self.load_entry(id).await?;
        self.authorize_entry(actor, &before, Action::Update).await?;
        Transition::Upgrade.check(before.state())?;
        check_upgrade_target(before.schema_version, target)?;

        let (payload, _) = self.open_entry(&before)?;
        let migrated =
            self.registry
                .migrate(&before.module_code, before.schema_version, target, payload)?;
        let payload = self.validate(&before.module_code, target, &Value::Object(migrated))?;
        let (sealed_payload, signature) = self.seal(&payload)?;

        let ctx = self.audit_context(actor, request);
        let mut after = before.clone();
        after.schema_version = target;
        after.sealed_payload = sealed_payload;
        after.signature = signature;
        after.updated_at = Some(ctx.at);
        after.updated_by = Some(actor.id);

        let record = self.recorder.updated(&before, &after, &ctx)?;
        self.commit(vec![
            BatchOperation::PutEntry(after.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!(
            "[cr-04] Entry {} upgraded {} v{} -> v{} by {}",
            after.id, after.module_code, before.schema_version, target, actor.id
        );
        Ok(EntryView::from_stored(&after, payload, target, true))
    }

    pub(super) async fn do_soft_delete(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
        reason: Option<String>,
    ) -> Result<(), EntryError> {
        let before = self.load_entry(id).await?;
        self.authorize_entry(actor, &before, Action::Delete).await?;
        Transition::SoftDelete.check(before.state())?;

        let ctx = self.audit_context(actor, request);
        let mut after = before.clone();
        after.deleted_at = Some(ctx.at);
        after.deleted_by = Some(actor.id);
        after.delete_reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());

        let record = self.recorder.deleted(&before, &ctx)?;
        self.commit(vec![
            BatchOperation::PutEntry(after),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Entry {} soft-deleted by {}", id, actor.id);
        Ok(())
    }

    pub(super) async fn do_restore(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<EntryView, EntryError> {
        let before = self.load_entry(id).await?;
        self.authorize_entry(actor, &before, Action::Update).await?;
        Transition::Restore.check(before.state())?;

        let (payload, verified) = self.open_entry(&before)?;
        let ctx = self.audit_context(actor, request);
        let mut after = before.clone();
        after.deleted_at = None;
        after.deleted_by = None;
        after.delete_reason = None;
        after.updated_at = Some(ctx.at);
        after.updated_by = Some(actor.id);

        let record = self.recorder.updated(&before, &after, &ctx)?;
        self.commit(vec![
            BatchOperation::PutEntry(after.clone()),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Entry {} restored by {}", id, actor.id);
        Ok(EntryView::from_stored(&after, payload, after.schema_version, verified))
    }

    pub(super) async fn do_hard_delete(
        &self,
        actor: &Actor,
        request: &RequestContext,
        id: EntryId,
    ) -> Result<(), EntryError> {
        self.gate.require_administrator(actor, "hard delete")?;
        let entry = self.load_entry(id).await?;
        Transition::HardDelete.check(entry.state())?;

        let ctx = self.audit_context(actor, request);
        let record = self.recorder.deleted(&entry, &ctx)?;
        self.commit(vec![
            BatchOperation::RemoveEntry(entry.id),
            BatchOperation::AppendAudit(record),
        ])
        .await?;

        info!("[cr-04] Entry {} permanently deleted by {}", id, actor.id);
        Ok(())
    }
}
