//! # CR-03 Audit Trail
//!
//! Immutable before/after records for every mutation and an access record
//! for every read.
//!
//! **Subsystem ID:** 03
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Append-only | Records are never updated or deleted |
//! | 2 | Shape | CREATE after-only, DELETE before-only, UPDATE both, READ neither |
//! | 3 | Masking | Encrypted and secret fields appear only as `<encrypted>` |
//! | 4 | Sparse update | UPDATE `before` holds only the changed fields |
//! | 5 | Same unit of work | Records are staged with the mutation, never written after it |
//!
//! Actor and request descriptors are passed in explicitly through
//! [`AuditContext`]; nothing is read from ambient state.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod recorder;
pub mod service;

// Re-exports
pub use adapters::InMemoryAuditLedger;
pub use domain::{
    leaks_sensitive, snapshot, sparse_diff, AuditContext, AuditError, AuditRecord, Auditable,
    EntityKind, NewAuditRecord, MASK_TOKEN,
};
pub use ports::{AuditStore, AuditTrailApi};
pub use recorder::AuditRecorder;
pub use service::AuditTrail;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
