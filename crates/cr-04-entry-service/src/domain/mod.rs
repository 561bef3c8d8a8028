//! # Domain Layer
//!
//! Entry and catalog types, lifecycle rules and the error taxonomy.

pub mod catalog;
pub mod entities;
pub mod errors;
pub mod lifecycle;

pub use catalog::{
    check_name, check_schema_version, normalize_code, CatalogFilter, CatalogPatch,
    ModuleCatalogEntry, NewCatalogEntry, MAX_CODE_LEN,
};
pub use entities::{
    EntryFilter, EntryPage, EntryQuery, EntryStats, EntryUpdate, EntryView, ListedEntry,
    ListedPayload, ModuleAvailability, ModuleCount, NewEntry, StatsFilter, StoredEntry,
};
pub use errors::{EntryError, StoreError};
pub use lifecycle::{check_upgrade_target, EntryState, Transition};
