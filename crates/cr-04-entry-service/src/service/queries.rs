//! # Queries
//!
//! Listing, statistics and the available-modules view.

use super::*;
use crate::domain::{
    EntryFilter, EntryPage, EntryQuery, EntryStats, ListedEntry, ListedPayload,
    ModuleAvailability, ModuleCount, StatsFilter,
};
use cr_02_access_gate::ModuleScope;
use std::collections::BTreeSet;

/// Where a non-administrator may look.
enum Visibility {
    /// Nothing is visible; answer with an empty result.
    Nothing,
    /// Restrict to these codes (`None` = all) and this unit (`None` = all).
    Scoped {
        module_codes: Option<BTreeSet<String>>,
        org_unit_id: Option<shared_types::OrgUnitId>,
    },
}

impl<R, S, G, A, T> EntryService<R, S, G, A, T>
where
    R: SchemaRegistryApi,
    S: EntryStore,
    G: AccessGateApi,
    A: AuditTrailApi,
    T: TimeSource,
{
    async fn visibility(
        &self,
        actor: &Actor,
        module_code: Option<&str>,
    ) -> Result<Visibility, EntryError> {
        let module_codes = match module_code {
            Some(code) => {
                self.gate.authorize_module(actor, code, Action::Read).await?;
                Some(BTreeSet::from([code.to_string()]))
            }
            None => match self.gate.module_scope(actor).await? {
                ModuleScope::All => None,
                scope if scope.is_empty() => return Ok(Visibility::Nothing),
                ModuleScope::Only(codes) => Some(codes),
            },
        };

        let org_unit_id = if actor.is_administrator {
            None
        } else {
            match actor.org_unit_id {
                Some(unit) => Some(unit),
                None => return Ok(Visibility::Nothing),
            }
        };

        Ok(Visibility::Scoped {
            module_codes,
            org_unit_id,
        })
    }

    pub(super) async fn do_list(
        &self,
        actor: &Actor,
        request: &RequestContext,
        filter: EntryFilter,
    ) -> Result<EntryPage, EntryError> {
        if filter.page == 0 {
            return Err(EntryError::InvalidRequest("page starts at 1".into()));
        }
        if filter.page_size == 0 || filter.page_size > self.config.max_page_size {
            return Err(EntryError::InvalidRequest(format!(
                "page_size must be between 1 and {}",
                self.config.max_page_size
            )));
        }
        if filter.include_deleted {
            self.gate
                .require_administrator(actor, "listing deleted entries")?;
        }
        if let Some(dossier_id) = filter.dossier_id {
            self.gate
                .authorize_dossier(actor, dossier_id, Action::Read)
                .await?;
        }

        let Visibility::Scoped {
            module_codes,
            org_unit_id,
        } = self.visibility(actor, filter.module_code.as_deref()).await?
        else {
            return Ok(EntryPage::empty(filter.page, filter.page_size));
        };

        let page_size = filter.page_size as usize;
        let query = EntryQuery {
            dossier_id: filter.dossier_id,
            org_unit_id,
            module_codes,
            include_deleted: filter.include_deleted,
            offset: (filter.page as usize - 1) * page_size,
            limit: Some(page_size),
            ..EntryQuery::default()
        }
        .with_dates(filter.occurred_from, filter.occurred_to);

        let found = self.store.query_entries(&query).await?;
        let ctx = self.audit_context(actor, request);
        let mut reads = Vec::with_capacity(found.rows.len());
        let mut items = Vec::with_capacity(found.rows.len());
        for entry in found.rows {
            reads.push(BatchOperation::AppendAudit(self.recorder.read(&entry, &ctx)));
            let payload = match self.open_entry(&entry) {
                Ok((payload, _)) => ListedPayload::Data(payload),
                Err(_) => ListedPayload::Unreadable,
            };
            items.push(ListedEntry {
                id: entry.id,
                dossier_id: entry.dossier_id,
                module_code: entry.module_code,
                schema_version: entry.schema_version,
                occurred_at: entry.occurred_at,
                created_at: entry.created_at,
                deleted_at: entry.deleted_at,
                payload,
            });
        }
        if !reads.is_empty() {
            self.commit(reads).await?;
        }

        debug!(
            "[cr-04] Listed {} of {} entries for {}",
            items.len(),
            found.total,
            actor.id
        );
        Ok(EntryPage {
            has_next: u64::from(filter.page) * u64::from(filter.page_size) < found.total,
            items,
            total: found.total,
            page: filter.page,
            page_size: filter.page_size,
        })
    }

    pub(super) async fn do_stats(
        &self,
        actor: &Actor,
        filter: StatsFilter,
    ) -> Result<EntryStats, EntryError> {
        if let Some(dossier_id) = filter.dossier_id {
            self.gate
                .authorize_dossier(actor, dossier_id, Action::Read)
                .await?;
        }

        let Visibility::Scoped {
            module_codes,
            org_unit_id,
        } = self.visibility(actor, None).await?
        else {
            return Ok(EntryStats::default());
        };

        let query = EntryQuery {
            dossier_id: filter.dossier_id,
            org_unit_id,
            module_codes,
            ..EntryQuery::default()
        }
        .with_dates(filter.occurred_from, filter.occurred_to);

        let counts = self.store.count_by_module(&query).await?;
        let total = counts.values().sum();
        Ok(EntryStats {
            modules: counts
                .into_iter()
                .map(|(code, count)| ModuleCount { code, count })
                .collect(),
            total,
        })
    }

    pub(super) async fn do_available_modules(
        &self,
        actor: &Actor,
        include_schema: bool,
    ) -> Result<Vec<ModuleAvailability>, EntryError> {
        let scope = self.gate.module_scope(actor).await?;
        let mut modules = Vec::new();
        for code in self.registry.codes() {
            if !scope.includes(&code) {
                continue;
            }
            let Some(latest_version) = self.registry.latest_version(&code) else {
                continue;
            };
            let schema = if include_schema {
                self.registry.describe(&code, latest_version)
            } else {
                None
            };
            modules.push(ModuleAvailability {
                versions: self.registry.versions(&code),
                code,
                latest_version,
                schema,
            });
        }
        Ok(modules)
    }
}
