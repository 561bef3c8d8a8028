//! # Directory Entities
//!
//! Read-only views of roles, organizational units and dossiers. They are
//! owned by administrative collaborators; the gate only inspects them.

use serde::{Deserialize, Serialize};
use shared_types::{DossierId, OrgUnitId, RoleId};
use std::collections::BTreeSet;

/// Named set of permitted module codes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: RoleId,
    /// Display name, reported in `Forbidden` errors.
    pub name: String,
    /// Module codes this role may use.
    pub modules: BTreeSet<String>,
}

impl Role {
    /// Create a role permitting `modules`.
    pub fn new<I, S>(id: RoleId, name: impl Into<String>, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id,
            name: name.into(),
            modules: modules.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `code` is in the permitted set.
    pub fn permits(&self, code: &str) -> bool {
        self.modules.contains(code)
    }
}

/// Facility or department boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    /// Unit identifier.
    pub id: OrgUnitId,
    /// Display name.
    pub name: String,
    /// Soft-delete marker.
    pub deleted: bool,
}

/// Clinical case record of one patient within one organizational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dossier {
    /// Dossier identifier.
    pub id: DossierId,
    /// Owning unit.
    pub org_unit_id: OrgUnitId,
    /// Soft-delete marker.
    pub deleted: bool,
}

/// Which module codes an actor may see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleScope {
    /// Administrator: every code.
    All,
    /// Exactly these codes (possibly none).
    Only(BTreeSet<String>),
}

impl ModuleScope {
    /// Whether `code` is inside the scope.
    pub fn includes(&self, code: &str) -> bool {
        match self {
            ModuleScope::All => true,
            ModuleScope::Only(codes) => codes.contains(code),
        }
    }

    /// Whether the scope is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, ModuleScope::Only(codes) if codes.is_empty())
    }
}
