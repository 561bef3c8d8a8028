//! # Access Gate Service
//!
//! Resolves directory records and applies the pure policy. Holds no state
//! of its own.

use crate::domain::{
    check_administrator, check_dossier, check_module, check_org_unit, module_scope, AccessError,
    Dossier, ModuleScope, OrgUnit, Role,
};
use crate::ports::{AccessGateApi, Directory};
use async_trait::async_trait;
use shared_types::{Action, Actor, DossierId, OrgUnitId};
use std::sync::Arc;

/// Access gate over a directory.
pub struct AccessGate<D: Directory> {
    directory: Arc<D>,
}

impl<D: Directory> AccessGate<D> {
    /// Create a gate.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }

    /// The directory this gate reads from.
    pub fn directory(&self) -> &Arc<D> {
        &self.directory
    }

    async fn actor_role(&self, actor: &Actor) -> Result<Option<Role>, AccessError> {
        if actor.is_administrator {
            return Ok(None);
        }
        match actor.role_id {
            Some(id) => self.directory.role(id).await,
            None => Ok(None),
        }
    }
}

#[async_trait]
impl<D: Directory> AccessGateApi for AccessGate<D> {
    async fn authorize_module(
        &self,
        actor: &Actor,
        code: &str,
        action: Action,
    ) -> Result<(), AccessError> {
        let role = self.actor_role(actor).await?;
        check_module(actor, role.as_ref(), code, action)
    }

    async fn authorize_dossier(
        &self,
        actor: &Actor,
        dossier_id: DossierId,
        action: Action,
    ) -> Result<Dossier, AccessError> {
        let dossier = self
            .directory
            .dossier(dossier_id)
            .await?
            .ok_or(AccessError::NotFound("dossier"))?;
        check_dossier(actor, &dossier, action)?;
        Ok(dossier)
    }

    async fn authorize_org_unit(
        &self,
        actor: &Actor,
        org_unit_id: OrgUnitId,
    ) -> Result<OrgUnit, AccessError> {
        let unit = self
            .directory
            .org_unit(org_unit_id)
            .await?
            .ok_or(AccessError::NotFound("organizational unit"))?;
        check_org_unit(actor, &unit)?;
        Ok(unit)
    }

    async fn module_scope(&self, actor: &Actor) -> Result<ModuleScope, AccessError> {
        let role = self.actor_role(actor).await?;
        Ok(module_scope(actor, role.as_ref()))
    }

    fn require_administrator(&self, actor: &Actor, operation: &str) -> Result<(), AccessError> {
        check_administrator(actor, operation)
    }
}
