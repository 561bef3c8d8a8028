//! # Access Policy
//!
//! Pure decision functions. They never log and never mutate; the caller
//! resolves directory records first and passes them in.
//!
//! | Check | Administrator | Other actors |
//! |-------|---------------|--------------|
//! | module | always ok | role must list the code |
//! | dossier / unit | ok; soft-deleted only for READ | same unit; soft-deleted is Gone |

use super::entities::{Dossier, ModuleScope, OrgUnit, Role};
use super::errors::AccessError;
use shared_types::{Action, Actor};

/// Decide module access given the actor's resolved role.
pub fn check_module(
    actor: &Actor,
    role: Option<&Role>,
    code: &str,
    action: Action,
) -> Result<(), AccessError> {
    if actor.is_administrator {
        return Ok(());
    }
    let role = role.ok_or_else(|| AccessError::Forbidden("user has no role assigned".into()))?;
    if role.permits(code) {
        Ok(())
    } else {
        Err(AccessError::Forbidden(format!(
            "{} access to module '{}' denied for role '{}'",
            action, code, role.name
        )))
    }
}

/// Module codes visible to the actor.
pub fn module_scope(actor: &Actor, role: Option<&Role>) -> ModuleScope {
    if actor.is_administrator {
        return ModuleScope::All;
    }
    ModuleScope::Only(role.map(|r| r.modules.clone()).unwrap_or_default())
}

/// Soft-deleted targets: administrators may read them, nothing else passes.
pub fn check_not_deleted(
    actor: &Actor,
    deleted: bool,
    action: Action,
    kind: &'static str,
) -> Result<(), AccessError> {
    if !deleted || (actor.is_administrator && action == Action::Read) {
        Ok(())
    } else {
        Err(AccessError::Gone(kind))
    }
}

/// Decide dossier access.
///
/// The unit comparison runs before the deletion check so that actors from
/// another unit cannot tell deleted dossiers from live ones.
pub fn check_dossier(actor: &Actor, dossier: &Dossier, action: Action) -> Result<(), AccessError> {
    check_same_unit(actor, dossier.org_unit_id, "dossier")?;
    check_not_deleted(actor, dossier.deleted, action, "dossier")
}

/// Decide organizational-unit access (always a read).
pub fn check_org_unit(actor: &Actor, unit: &OrgUnit) -> Result<(), AccessError> {
    check_same_unit(actor, unit.id, "organizational unit")?;
    check_not_deleted(actor, unit.deleted, Action::Read, "organizational unit")
}

/// Only administrators pass.
pub fn check_administrator(actor: &Actor, operation: &str) -> Result<(), AccessError> {
    if actor.is_administrator {
        Ok(())
    } else {
        Err(AccessError::Forbidden(format!(
            "{} requires administrator rights",
            operation
        )))
    }
}

fn check_same_unit(
    actor: &Actor,
    target_unit: shared_types::OrgUnitId,
    kind: &'static str,
) -> Result<(), AccessError> {
    if actor.is_administrator {
        return Ok(());
    }
    match actor.org_unit_id {
        None => Err(AccessError::Forbidden(
            "user not assigned to any organizational unit".into(),
        )),
        Some(unit) if unit == target_unit => Ok(()),
        Some(_) => Err(AccessError::Forbidden(format!(
            "cannot access {} from a different organizational unit",
            kind
        ))),
    }
}
