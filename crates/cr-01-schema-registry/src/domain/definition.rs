//! # Module Definitions
//!
//! A definition binds one `(module code, schema version)` key to its schema
//! and, for every version after the first, to the function that lifts a
//! payload from the previous version.

use super::errors::StepError;
use super::schema::ModuleSchema;
use shared_types::{Payload, SchemaVersion};
use std::fmt;

/// Pure function converting a payload at version `N - 1` into version `N`.
pub type MigrateFn = fn(Payload) -> Result<Payload, StepError>;

/// Composite registry key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModuleKey {
    /// Module code, e.g. `ROG26/1.4`.
    pub code: String,
    /// Schema version, starting at 1.
    pub version: SchemaVersion,
}

impl ModuleKey {
    /// Create a key.
    pub fn new(code: impl Into<String>, version: SchemaVersion) -> Self {
        Self {
            code: code.into(),
            version,
        }
    }
}

impl fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.code, self.version)
    }
}

/// Immutable registry entry.
#[derive(Clone)]
pub struct ModuleDefinition {
    /// Lookup key.
    pub key: ModuleKey,
    /// Human-readable module title.
    pub title: String,
    /// Structural schema of payloads at this version.
    pub schema: ModuleSchema,
    /// Step from `version - 1`; `None` only for version 1.
    pub migrate_from_previous: Option<MigrateFn>,
}

impl ModuleDefinition {
    /// First version of a module.
    pub fn initial(
        code: impl Into<String>,
        title: impl Into<String>,
        schema: ModuleSchema,
    ) -> Self {
        Self {
            key: ModuleKey::new(code, 1),
            title: title.into(),
            schema,
            migrate_from_previous: None,
        }
    }

    /// A later version reachable from `version - 1` through `migrate`.
    pub fn successor(
        code: impl Into<String>,
        version: SchemaVersion,
        title: impl Into<String>,
        schema: ModuleSchema,
        migrate: MigrateFn,
    ) -> Self {
        Self {
            key: ModuleKey::new(code, version),
            title: title.into(),
            schema,
            migrate_from_previous: Some(migrate),
        }
    }

    /// Module code.
    pub fn code(&self) -> &str {
        &self.key.code
    }

    /// Schema version.
    pub fn version(&self) -> SchemaVersion {
        self.key.version
    }
}

impl fmt::Debug for ModuleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleDefinition")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("fields", &self.schema.fields().len())
            .field("has_migration", &self.migrate_from_previous.is_some())
            .finish()
    }
}
