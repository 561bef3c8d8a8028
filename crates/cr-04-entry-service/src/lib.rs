//! # CR-04 Entry Service
//!
//! Versioned clinical module entries: create, read, update, upgrade,
//! soft/hard delete and restore, plus the administrative module catalog.
//!
//! **Subsystem ID:** 04
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Control flow
//!
//! ```text
//! write: gate ─▶ validate (cr-01) ─▶ seal (shared-crypto) ─▶ audit record (cr-03)
//!          └──────────────▶ one atomic batch: row change + audit record
//! read:  gate ─▶ fetch ─▶ open ─▶ [view-only migration] ─▶ READ record
//! ```
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Plaintext never stored | Only the sealed payload reaches the store |
//! | 2 | Audited mutations | Row change and audit record commit together or not at all |
//! | 3 | Forward upgrades | `target > current`, migrated payload re-validated |
//! | 4 | No silent data loss | Undecryptable payloads are errors or `Unreadable` rows |
//! | 5 | Unit isolation | Non-administrators only reach dossiers of their own unit |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{FixedTimeSource, InMemoryEntryStore, SystemTimeSource};
pub use config::{ConfigError, EngineConfig, Environment};
pub use domain::{
    CatalogFilter, CatalogPatch, EntryError, EntryFilter, EntryPage, EntryState, EntryStats,
    EntryUpdate, EntryView, ListedEntry, ListedPayload, ModuleAvailability, ModuleCatalogEntry,
    ModuleCount, NewCatalogEntry, NewEntry, StatsFilter, StoreError, StoredEntry,
};
pub use ports::{AuditQueryApi, BatchOperation, CatalogApi, EntryApi, EntryStore, TimeSource};
pub use service::{EntryService, EntryServiceDependencies};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
