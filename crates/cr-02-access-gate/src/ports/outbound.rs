//! # Outbound Ports (Driven Ports)
//!
//! Lookups the gate needs from the administrative directory.
//!
//! Production: the host's user/role/structure tables.
//! Testing: `InMemoryDirectory` (adapters).

use crate::domain::{AccessError, Dossier, OrgUnit, Role};
use async_trait::async_trait;
use shared_types::{DossierId, OrgUnitId, RoleId};

/// Role / dossier / unit lookup collaborator.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Fetch a role.
    async fn role(&self, id: RoleId) -> Result<Option<Role>, AccessError>;

    /// Fetch a dossier, including soft-deleted ones.
    async fn dossier(&self, id: DossierId) -> Result<Option<Dossier>, AccessError>;

    /// Fetch an organizational unit, including soft-deleted ones.
    async fn org_unit(&self, id: OrgUnitId) -> Result<Option<OrgUnit>, AccessError>;
}
