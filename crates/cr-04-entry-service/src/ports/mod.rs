//! # Ports Layer
//!
//! - `inbound`: entry, catalog and audit query APIs
//! - `outbound`: storage and time SPIs

pub mod inbound;
pub mod outbound;

pub use inbound::{AuditQueryApi, CatalogApi, EntryApi};
pub use outbound::{BatchOperation, EntryStore, QueriedEntries, TimeSource};
