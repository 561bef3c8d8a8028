//! # Domain Errors
//!
//! Public failure taxonomy of the entry engine. Subsystem errors convert in
//! through `From`, so service code propagates them with `?`.

use cr_01_schema_registry::{MigrationError, RegistryError, SchemaViolation};
use cr_02_access_gate::AccessError;
use cr_03_audit_trail::AuditError;
use shared_types::EntryId;
use thiserror::Error;

/// Entry-service errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    /// Payload failed structural validation; nothing was persisted.
    #[error("Schema validation failed: {0}")]
    SchemaViolation(#[from] SchemaViolation),

    /// Module code or `(code, version)` pair is not registered.
    #[error("Unknown schema: {0}")]
    UnknownSchema(String),

    /// No forward path between the requested versions.
    #[error("Migration gap: {0}")]
    MigrationGap(String),

    /// A migration step rejected the payload.
    #[error("Migration failed: {0}")]
    MigrationStepFailed(String),

    /// The stored payload cannot be opened with the current key.
    #[error("Stored payload of entry {entry_id} cannot be decrypted")]
    DecryptionFailure {
        /// Affected entry.
        entry_id: EntryId,
    },

    /// Sealing a payload failed.
    #[error("Payload encryption failed: {0}")]
    EncryptionFailure(String),

    /// Access denied.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Target does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// Target is soft-deleted.
    #[error("{0} has been deleted")]
    Gone(String),

    /// The audit record could not be written; the mutation was not applied.
    #[error("Audit write failed: {0}")]
    AuditWriteFailure(String),

    /// Caller precondition violated.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Unique key already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backing store failure or timeout.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl EntryError {
    /// Whether the failure is a rejection of the caller's request rather
    /// than an integrity or infrastructure problem.
    pub fn is_rejection(&self) -> bool {
        !matches!(
            self,
            EntryError::DecryptionFailure { .. }
                | EntryError::EncryptionFailure(_)
                | EntryError::AuditWriteFailure(_)
                | EntryError::Storage(_)
        )
    }
}

impl From<RegistryError> for EntryError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::UnknownSchema { code, version } => {
                EntryError::UnknownSchema(format!("{} v{}", code, version))
            }
            RegistryError::UnknownModule(code) => EntryError::UnknownSchema(code),
            RegistryError::Violation(violation) => EntryError::SchemaViolation(violation),
            RegistryError::Migration(migration) => migration.into(),
            RegistryError::InvalidTable(reason) => EntryError::InvalidRequest(reason),
        }
    }
}

impl From<MigrationError> for EntryError {
    fn from(err: MigrationError) -> Self {
        match err {
            MigrationError::Downgrade { .. } | MigrationError::Gap { .. } => {
                EntryError::MigrationGap(err.to_string())
            }
            MigrationError::StepFailed { .. } => EntryError::MigrationStepFailed(err.to_string()),
        }
    }
}

impl From<AccessError> for EntryError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::Forbidden(reason) => EntryError::Forbidden(reason),
            AccessError::NotFound(kind) => EntryError::NotFound(kind.to_string()),
            AccessError::Gone(kind) => EntryError::Gone(kind.to_string()),
            AccessError::Directory(reason) => EntryError::Storage(reason),
        }
    }
}

impl From<AuditError> for EntryError {
    fn from(err: AuditError) -> Self {
        match err {
            AuditError::Snapshot(reason) | AuditError::WriteFailed(reason) => {
                EntryError::AuditWriteFailure(reason)
            }
            AuditError::QueryFailed(reason) => EntryError::Storage(reason),
        }
    }
}

/// Failures reported by an `EntryStore`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The audit part of a batch was refused; nothing was applied.
    #[error("audit append refused: {0}")]
    AuditRejected(String),

    /// A batch operation referenced a missing row; nothing was applied.
    #[error("{0} not found")]
    Missing(String),

    /// Backend unavailable or timed out.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for EntryError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AuditRejected(reason) => EntryError::AuditWriteFailure(reason),
            StoreError::Missing(what) => EntryError::NotFound(what),
            StoreError::Unavailable(reason) => EntryError::Storage(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_errors_split() {
        let gap = MigrationError::Gap {
            code: "M1".into(),
            from: 1,
            to: 3,
            missing: 2,
        };
        assert!(matches!(EntryError::from(gap), EntryError::MigrationGap(_)));

        let down = MigrationError::Downgrade {
            code: "M1".into(),
            from: 2,
            to: 1,
        };
        assert!(matches!(EntryError::from(down), EntryError::MigrationGap(_)));
    }

    #[test]
    fn test_unknown_schema_is_not_a_violation() {
        let err: EntryError = RegistryError::UnknownSchema {
            code: "M9".into(),
            version: 4,
        }
        .into();
        assert_eq!(err, EntryError::UnknownSchema("M9 v4".into()));
    }

    #[test]
    fn test_audit_rejection_maps_to_audit_failure() {
        let err: EntryError = StoreError::AuditRejected("disk full".into()).into();
        assert!(matches!(err, EntryError::AuditWriteFailure(_)));
        assert!(!err.is_rejection());
    }

    #[test]
    fn test_access_outcomes_keep_minimal_detail() {
        let err: EntryError = AccessError::Gone("dossier").into();
        assert_eq!(err.to_string(), "dossier has been deleted");
        assert!(err.is_rejection());
    }
}
