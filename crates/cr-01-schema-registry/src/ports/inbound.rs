//! # Inbound Ports
//!
//! What the rest of the engine may ask the registry.

use crate::domain::{MigrateFn, MigrationError, ModuleDefinition, RegistryError};
use serde_json::Value;
use shared_types::{Payload, SchemaVersion};

/// Schema Registry API - inbound port.
///
/// Read-only after construction. Absence is an `Option` for lookups and an
/// error only when validation or migration needs the missing key.
pub trait SchemaRegistryApi: Send + Sync {
    /// Exact `(code, version)` lookup.
    fn resolve(&self, code: &str, version: SchemaVersion) -> Option<&ModuleDefinition>;

    /// Highest registered version of `code`.
    fn latest_version(&self, code: &str) -> Option<SchemaVersion>;

    /// Step function lifting `version - 1` to `version`.
    fn migration_step(&self, code: &str, version: SchemaVersion) -> Option<MigrateFn>;

    /// All registered versions of `code`, ascending.
    fn versions(&self, code: &str) -> Vec<SchemaVersion>;

    /// All registered module codes, ascending.
    fn codes(&self) -> Vec<String>;

    /// Validate a raw payload against `(code, version)`.
    fn validate(&self, code: &str, version: SchemaVersion, raw: &Value)
        -> Result<Payload, RegistryError>;

    /// Migrate `data` forward from `from` to `to`.
    fn migrate(
        &self,
        code: &str,
        from: SchemaVersion,
        to: SchemaVersion,
        data: Payload,
    ) -> Result<Payload, MigrationError>;

    /// JSON description of a registered schema.
    fn describe(&self, code: &str, version: SchemaVersion) -> Option<Value>;
}
