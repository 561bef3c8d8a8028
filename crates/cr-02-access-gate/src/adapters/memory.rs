//! In-memory directory for tests and embedded use.

use crate::domain::{AccessError, Dossier, OrgUnit, Role};
use crate::ports::Directory;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{DossierId, OrgUnitId, RoleId};
use std::collections::HashMap;

#[derive(Default)]
struct Tables {
    roles: HashMap<RoleId, Role>,
    dossiers: HashMap<DossierId, Dossier>,
    units: HashMap<OrgUnitId, OrgUnit>,
}

/// Directory backed by hash maps.
#[derive(Default)]
pub struct InMemoryDirectory {
    tables: RwLock<Tables>,
}

impl InMemoryDirectory {
    /// Empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a role.
    pub fn put_role(&self, role: Role) {
        self.tables.write().roles.insert(role.id, role);
    }

    /// Insert or replace a dossier.
    pub fn put_dossier(&self, dossier: Dossier) {
        self.tables.write().dossiers.insert(dossier.id, dossier);
    }

    /// Insert or replace an organizational unit.
    pub fn put_org_unit(&self, unit: OrgUnit) {
        self.tables.write().units.insert(unit.id, unit);
    }

    /// Grant an extra module to an existing role. Returns `false` if the role is unknown.
    pub fn grant_module(&self, role_id: RoleId, code: &str) -> bool {
        match self.tables.write().roles.get_mut(&role_id) {
            Some(role) => {
                role.modules.insert(code.to_string());
                true
            }
            None => false,
        }
    }

    /// Set the soft-delete marker of a dossier. Returns `false` if unknown.
    pub fn mark_dossier_deleted(&self, id: DossierId, deleted: bool) -> bool {
        match self.tables.write().dossiers.get_mut(&id) {
            Some(dossier) => {
                dossier.deleted = deleted;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn role(&self, id: RoleId) -> Result<Option<Role>, AccessError> {
        Ok(self.tables.read().roles.get(&id).cloned())
    }

    async fn dossier(&self, id: DossierId) -> Result<Option<Dossier>, AccessError> {
        Ok(self.tables.read().dossiers.get(&id).cloned())
    }

    async fn org_unit(&self, id: OrgUnitId) -> Result<Option<OrgUnit>, AccessError> {
        Ok(self.tables.read().units.get(&id).cloned())
    }
}
