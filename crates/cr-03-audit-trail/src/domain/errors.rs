//! # Domain Errors

use thiserror::Error;

/// Audit trail errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// Entity could not be turned into a snapshot.
    #[error("Snapshot failed: {0}")]
    Snapshot(String),

    /// The ledger refused the append.
    #[error("Audit write failed: {0}")]
    WriteFailed(String),

    /// The ledger could not be read.
    #[error("Audit query failed: {0}")]
    QueryFailed(String),
}
