//! # CR-02 Access Gate
//!
//! Role-based and organizational-unit authorization for module entries.
//!
//! **Subsystem ID:** 02
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Rules
//!
//! | Rule | Description |
//! |------|-------------|
//! | Administrator bypass | Global administrators skip module and unit checks |
//! | Role required | Other actors need a role listing the module code |
//! | Same unit | Dossier unit must equal the actor's unit, for every action |
//! | Soft delete | Deleted targets: administrator READ only, otherwise Gone |
//!
//! Policy decisions are pure functions in `domain::policy`; the service only
//! fetches directory records through the `Directory` port.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::InMemoryDirectory;
pub use domain::{AccessError, Dossier, ModuleScope, OrgUnit, Role};
pub use ports::{AccessGateApi, Directory};
pub use service::AccessGate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
