//! # Inbound Ports
//!
//! Authorization API used by the entry service.

use crate::domain::{AccessError, Dossier, ModuleScope, OrgUnit};
use async_trait::async_trait;
use shared_types::{Action, Actor, DossierId, OrgUnitId};

/// Access Gate API - inbound port.
#[async_trait]
pub trait AccessGateApi: Send + Sync {
    /// Role/module check.
    async fn authorize_module(
        &self,
        actor: &Actor,
        code: &str,
        action: Action,
    ) -> Result<(), AccessError>;

    /// Dossier check; returns the dossier on success.
    async fn authorize_dossier(
        &self,
        actor: &Actor,
        dossier_id: DossierId,
        action: Action,
    ) -> Result<Dossier, AccessError>;

    /// Organizational-unit check; returns the unit on success.
    async fn authorize_org_unit(
        &self,
        actor: &Actor,
        org_unit_id: OrgUnitId,
    ) -> Result<OrgUnit, AccessError>;

    /// Module codes visible to the actor.
    async fn module_scope(&self, actor: &Actor) -> Result<ModuleScope, AccessError>;

    /// Administrator-only guard.
    fn require_administrator(&self, actor: &Actor, operation: &str) -> Result<(), AccessError>;
}
