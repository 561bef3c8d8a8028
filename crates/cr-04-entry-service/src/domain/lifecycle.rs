//! # Entry Lifecycle
//!
//! ```text
//! absent ──create──▶ active ──soft delete──▶ soft-deleted
//!                     ▲  │ update / upgrade       │
//!                     │  └───────────────┘         │
//!                     └────────── restore ─────────┘
//! active | soft-deleted ──hard delete──▶ absent (terminal)
//! ```

use super::errors::EntryError;
use shared_types::SchemaVersion;

/// Persisted state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    /// Visible and mutable.
    Active,
    /// Hidden; restorable.
    SoftDeleted,
}

/// State-changing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Payload or clinical-time change.
    Update,
    /// Forward schema version change.
    Upgrade,
    /// Mark deleted.
    SoftDelete,
    /// Clear the deleted marker.
    Restore,
    /// Remove for good.
    HardDelete,
}

impl Transition {
    /// Check that `state` admits this transition.
    pub fn check(self, state: EntryState) -> Result<(), EntryError> {
        match (self, state) {
            (Transition::HardDelete, _) => Ok(()),
            (Transition::Restore, EntryState::SoftDeleted) => Ok(()),
            (Transition::Restore, EntryState::Active) => {
                Err(EntryError::InvalidRequest("entry is not deleted".into()))
            }
            (_, EntryState::Active) => Ok(()),
            (_, EntryState::SoftDeleted) => Err(EntryError::Gone("entry".into())),
        }
    }
}

/// An upgrade must move strictly forward.
pub fn check_upgrade_target(
    current: SchemaVersion,
    target: SchemaVersion,
) -> Result<(), EntryError> {
    if target <= current {
        return Err(EntryError::InvalidRequest(format!(
            "target version {} must be greater than current version {}",
            target, current
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_transitions() {
        for t in [
            Transition::Update,
            Transition::Upgrade,
            Transition::SoftDelete,
            Transition::HardDelete,
        ] {
            assert!(t.check(EntryState::Active).is_ok(), "{:?}", t);
        }
        assert!(matches!(
            Transition::Restore.check(EntryState::Active),
            Err(EntryError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_soft_deleted_transitions() {
        for t in [Transition::Update, Transition::Upgrade, Transition::SoftDelete] {
            assert!(matches!(
                t.check(EntryState::SoftDeleted),
                Err(EntryError::Gone(_))
            ));
        }
        assert!(Transition::Restore.check(EntryState::SoftDeleted).is_ok());
        assert!(Transition::HardDelete.check(EntryState::SoftDeleted).is_ok());
    }

    #[test]
    fn test_upgrade_target_must_increase() {
        assert!(check_upgrade_target(1, 2).is_ok());
        assert!(check_upgrade_target(1, 1).is_err());
        assert!(check_upgrade_target(2, 1).is_err());
    }
}
