//! # CR-01 Schema Registry
//!
//! Versioned structural schemas for clinical module payloads.
//!
//! **Subsystem ID:** 01
//! **Architecture:** Hexagonal (domain + algorithms + inbound port)
//!
//! ## Purpose
//!
//! - resolve `(module code, schema version)` to a definition
//! - validate raw payloads against closed schemas, reporting every violation
//! - migrate payloads forward one version at a time
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Description |
//! |----|-----------|-------------|
//! | 1 | Closed schemas | Undeclared keys are violations |
//! | 2 | Exact enumerations | Choice values match case-sensitively |
//! | 3 | Unbroken chain | Versions `1..=latest`, each `> 1` has a step |
//! | 4 | Forward only | `to < from` is rejected |
//! | 5 | Identity | `migrate(c, v, v, d) == d` |
//!
//! ## Module Structure
//!
//! ```text
//! cr-01-schema-registry/
//! ├── domain/       # FieldKind, ModuleSchema, ModuleDefinition, errors
//! ├── algorithms/   # validator, migration chain, schema description
//! ├── ports/        # SchemaRegistryApi
//! ├── registry/     # SchemaRegistry + RegistryBuilder
//! └── builtin/      # ROG26 module table
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithms;
pub mod builtin;
pub mod domain;
pub mod ports;
pub mod registry;

// Re-exports
pub use algorithms::{describe_schema, run_chain, validate_payload};
pub use builtin::{builtin_definitions, builtin_registry};
pub use domain::{
    FieldKind, FieldSpec, MigrateFn, MigrationError, ModuleDefinition, ModuleKey, ModuleSchema,
    Presence, RegistryError, SchemaViolation, StepError, Violation, ViolationKind,
};
pub use ports::SchemaRegistryApi;
pub use registry::{RegistryBuilder, SchemaRegistry};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
