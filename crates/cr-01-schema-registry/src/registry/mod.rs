//! # Schema Registry
//!
//! Immutable map from `(module code, schema version)` to definitions,
//! populated once at start-up through [`RegistryBuilder`].
//!
//! ## Table invariants (checked by `build`)
//!
//! - versions of a code are exactly `1..=latest`
//! - version 1 has no migration; every later version has one
//! - no duplicate keys or duplicate field names

use crate::algorithms::{describe_definition, run_chain, validate_payload};
use crate::domain::{
    MigrateFn, MigrationError, ModuleDefinition, ModuleKey, ModuleSchema, RegistryError,
    SchemaViolation,
};
use crate::ports::SchemaRegistryApi;
use serde_json::Value;
use shared_types::{Payload, SchemaVersion};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Collects definitions and checks chain continuity.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    definitions: Vec<ModuleDefinition>,
}

impl RegistryBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition.
    pub fn define(mut self, definition: ModuleDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add several definitions.
    pub fn define_all(mut self, definitions: impl IntoIterator<Item = ModuleDefinition>) -> Self {
        self.definitions.extend(definitions);
        self
    }

    /// Check the table and freeze it.
    pub fn build(self) -> Result<SchemaRegistry, RegistryError> {
        let mut table: BTreeMap<ModuleKey, ModuleDefinition> = BTreeMap::new();

        for definition in self.definitions {
            if definition.version() == 0 {
                return Err(RegistryError::InvalidTable(format!(
                    "{}: versions start at 1",
                    definition.key
                )));
            }
            if definition.code().trim().is_empty() {
                return Err(RegistryError::InvalidTable("empty module code".into()));
            }
            check_schema_names(&definition.key, &definition.schema)?;
            match (definition.version(), definition.migrate_from_previous.is_some()) {
                (1, true) => {
                    return Err(RegistryError::InvalidTable(format!(
                        "{}: first version cannot have a migration",
                        definition.key
                    )))
                }
                (v, false) if v > 1 => {
                    return Err(RegistryError::InvalidTable(format!(
                        "{}: missing migration from v{}",
                        definition.key,
                        v - 1
                    )))
                }
                _ => {}
            }
            if table.contains_key(&definition.key) {
                return Err(RegistryError::InvalidTable(format!(
                    "{} defined twice",
                    definition.key
                )));
            }
            table.insert(definition.key.clone(), definition);
        }

        // BTreeMap order groups each code's versions ascending.
        let mut expected: Option<(&str, SchemaVersion)> = None;
        for key in table.keys() {
            let next = match expected {
                Some((code, v)) if code == key.code => v + 1,
                _ => 1,
            };
            if key.version != next {
                return Err(RegistryError::InvalidTable(format!(
                    "{} has no v{}",
                    key.code, next
                )));
            }
            expected = Some((key.code.as_str(), key.version));
        }

        let registry = SchemaRegistry { table };
        info!(
            "[cr-01] Schema registry ready: {} module(s), {} definition(s)",
            registry.codes().len(),
            registry.table.len()
        );
        Ok(registry)
    }
}

fn check_schema_names(key: &ModuleKey, schema: &ModuleSchema) -> Result<(), RegistryError> {
    let dups = schema.duplicate_names();
    if !dups.is_empty() {
        return Err(RegistryError::InvalidTable(format!(
            "{}: duplicate field(s) {}",
            key,
            dups.join(", ")
        )));
    }
    for field in schema.fields() {
        if let crate::domain::FieldKind::Object(nested) = &field.kind {
            check_schema_names(key, nested)?;
        }
    }
    Ok(())
}

/// Frozen registry.
#[derive(Debug)]
pub struct SchemaRegistry {
    table: BTreeMap<ModuleKey, ModuleDefinition>,
}

impl SchemaRegistry {
    /// Start building a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    fn definitions_of<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a ModuleDefinition> {
        self.table
            .range(ModuleKey::new(code, 0)..)
            .take_while(move |(k, _)| k.code == code)
            .map(|(_, d)| d)
    }
}

impl SchemaRegistryApi for SchemaRegistry {
    fn resolve(&self, code: &str, version: SchemaVersion) -> Option<&ModuleDefinition> {
        self.table.get(&ModuleKey::new(code, version))
    }

    fn latest_version(&self, code: &str) -> Option<SchemaVersion> {
        self.definitions_of(code).map(|d| d.version()).last()
    }

    fn migration_step(&self, code: &str, version: SchemaVersion) -> Option<MigrateFn> {
        self.resolve(code, version)
            .and_then(|d| d.migrate_from_previous)
    }

    fn versions(&self, code: &str) -> Vec<SchemaVersion> {
        self.definitions_of(code).map(|d| d.version()).collect()
    }

    fn codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.table.keys().map(|k| k.code.clone()).collect();
        codes.dedup();
        codes
    }

    fn validate(
        &self,
        code: &str,
        version: SchemaVersion,
        raw: &Value,
    ) -> Result<Payload, RegistryError> {
        let definition = self
            .resolve(code, version)
            .ok_or_else(|| RegistryError::UnknownSchema {
                code: code.to_string(),
                version,
            })?;

        let payload = validate_payload(&definition.schema, raw).map_err(|violations| {
            SchemaViolation {
                code: code.to_string(),
                version,
                violations,
            }
        })?;
        debug!("[cr-01] Payload valid for {} v{}", code, version);
        Ok(payload)
    }

    fn migrate(
        &self,
        code: &str,
        from: SchemaVersion,
        to: SchemaVersion,
        data: Payload,
    ) -> Result<Payload, MigrationError> {
        run_chain(code, from, to, data, |v| self.migration_step(code, v))
    }

    fn describe(&self, code: &str, version: SchemaVersion) -> Option<Value> {
        self.resolve(code, version).map(describe_definition)
    }
}
